//! 用户实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub last_login: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::assignments::Entity")]
    Assignments,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_user(self) -> crate::models::users::entities::User {
        use crate::models::users::entities::{User, UserRole};
        use chrono::{DateTime, Utc};

        User {
            id: self.id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            // 角色列由我们写入，未知取值按学生处理
            role: self.role.parse().unwrap_or(UserRole::Student),
            last_login: self
                .last_login
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
