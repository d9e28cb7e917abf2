use serde::Deserialize;

use super::entities::UserRole;

// 创建用户请求（password 字段为已哈希的密码）
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}
