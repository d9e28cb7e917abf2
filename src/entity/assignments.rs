//! 作业实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub teacher_id: Option<i64>,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub grade: Option<String>,
    pub state: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::TeacherId",
        to = "super::users::Column::Id"
    )]
    Teacher,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_assignment(self) -> crate::errors::Result<crate::models::assignments::entities::Assignment> {
        use crate::errors::AssignFlowError;
        use crate::models::assignments::entities::Assignment;
        use chrono::{DateTime, Utc};

        // 状态/评级列损坏时报错，不得默默退回草稿而破坏状态不变式
        let state = self.state.parse().map_err(|e| {
            AssignFlowError::database_operation(format!("作业 {} 状态列损坏: {e}", self.id))
        })?;
        let grade = self
            .grade
            .map(|g| {
                g.parse().map_err(|e| {
                    AssignFlowError::database_operation(format!("作业 {} 评级列损坏: {e}", self.id))
                })
            })
            .transpose()?;

        Ok(Assignment {
            id: self.id,
            student_id: self.student_id,
            teacher_id: self.teacher_id,
            content: self.content,
            grade,
            state,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        })
    }
}
