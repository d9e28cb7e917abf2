//! 用户存储操作

use super::SeaOrmStorage;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{AssignFlowError, Result};
use crate::models::users::entities::{User, UserRole};
use crate::models::users::requests::CreateUserRequest;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            username: Set(req.username),
            email: Set(req.email),
            password_hash: Set(req.password),
            role: Set(req.role.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AssignFlowError::database_operation(format!("创建用户失败: {e}")))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AssignFlowError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名获取用户
    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| AssignFlowError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 列出全部教师
    pub async fn list_teachers_impl(&self) -> Result<Vec<User>> {
        let result = Users::find()
            .filter(Column::Role.eq(UserRole::TEACHER))
            .all(&self.db)
            .await
            .map_err(|e| AssignFlowError::database_operation(format!("查询教师列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_user()).collect())
    }

    /// 统计用户数
    pub async fn count_users_impl(&self) -> Result<u64> {
        Users::find()
            .count(&self.db)
            .await
            .map_err(|e| AssignFlowError::database_operation(format!("统计用户数失败: {e}")))
    }

    /// 更新最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let result = Users::update_many()
            .col_expr(
                Column::LastLogin,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                AssignFlowError::database_operation(format!("更新最后登录时间失败: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }
}
