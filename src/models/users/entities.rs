use serde::{Deserialize, Serialize};

// 用户角色
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Student,   // 学生
    Teacher,   // 教师
    Principal, // 校长
}

impl UserRole {
    pub const STUDENT: &'static str = "student";
    pub const TEACHER: &'static str = "teacher";
    pub const PRINCIPAL: &'static str = "principal";
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            UserRole::STUDENT => Ok(UserRole::Student),
            UserRole::TEACHER => Ok(UserRole::Teacher),
            UserRole::PRINCIPAL => Ok(UserRole::Principal),
            _ => Err(serde::de::Error::custom(format!(
                "Invalid user role: '{s}'. Supported roles: student, teacher, principal"
            ))),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Student => write!(f, "{}", UserRole::STUDENT),
            UserRole::Teacher => write!(f, "{}", UserRole::TEACHER),
            UserRole::Principal => write!(f, "{}", UserRole::PRINCIPAL),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(UserRole::Student),
            "teacher" => Ok(UserRole::Teacher),
            "principal" => Ok(UserRole::Principal),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    pub password_hash: String,
    pub role: UserRole,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    // 生成访问令牌
    pub fn generate_access_token(&self) -> Result<String, String> {
        crate::utils::jwt::JwtUtils::generate_access_token(self.id, &self.role.to_string())
            .map_err(|e| format!("Failed to generate access token: {e}"))
    }

    // 生成 token 对（access + refresh）
    pub fn generate_token_pair(&self) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(self.id, &self.role.to_string())
            .map_err(|e| format!("Failed to generate token pair: {e}"))
    }
}
