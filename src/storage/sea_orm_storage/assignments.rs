//! 作业存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::errors::{AssignFlowError, Result};
use crate::models::assignments::entities::{Assignment, AssignmentState};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    sea_query::Expr,
};

impl SeaOrmStorage {
    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(&self, id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AssignFlowError::database_operation(format!("查询作业失败: {e}")))?;

        result.map(|m| m.into_assignment()).transpose()
    }

    /// 创建草稿作业
    pub async fn create_assignment_impl(
        &self,
        student_id: i64,
        content: String,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(student_id),
            teacher_id: Set(None),
            content: Set(content),
            grade: Set(None),
            state: Set(AssignmentState::Draft.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AssignFlowError::database_operation(format!("创建作业失败: {e}")))?;

        result.into_assignment()
    }

    /// 更新作业，带乐观状态守卫
    ///
    /// 单条 UPDATE 以 id + 读取时的 state 作为过滤条件，保证
    /// 读-改-写对单行是原子的；两个并发请求竞争同一次状态转移时
    /// 只有一个能命中守卫，另一个拿到 None。
    pub async fn update_assignment_impl(
        &self,
        assignment: &Assignment,
        expected: AssignmentState,
    ) -> Result<Option<Assignment>> {
        let now = chrono::Utc::now().timestamp();

        let result = Assignments::update_many()
            .col_expr(Column::Content, Expr::value(assignment.content.clone()))
            .col_expr(Column::TeacherId, Expr::value(assignment.teacher_id))
            .col_expr(
                Column::Grade,
                Expr::value(assignment.grade.map(|g| g.to_string())),
            )
            .col_expr(Column::State, Expr::value(assignment.state.to_string()))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(assignment.id))
            .filter(Column::State.eq(expected.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| AssignFlowError::database_operation(format!("更新作业失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_assignment_by_id_impl(assignment.id).await
    }

    /// 删除作业
    pub async fn delete_assignment_impl(&self, id: i64) -> Result<bool> {
        let result = Assignments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| AssignFlowError::database_operation(format!("删除作业失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 列出学生的全部作业
    pub async fn list_assignments_by_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<Assignment>> {
        let result = Assignments::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| AssignFlowError::database_operation(format!("查询作业列表失败: {e}")))?;

        result.into_iter().map(|m| m.into_assignment()).collect()
    }

    /// 列出学生处于已提交状态的作业（不含草稿与已批改）
    pub async fn list_submitted_assignments_by_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<Assignment>> {
        let result = Assignments::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::State.eq(AssignmentState::SUBMITTED))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| AssignFlowError::database_operation(format!("查询作业列表失败: {e}")))?;

        result.into_iter().map(|m| m.into_assignment()).collect()
    }

    /// 列出提交给某教师的作业
    pub async fn list_assignments_by_teacher_impl(
        &self,
        teacher_id: i64,
    ) -> Result<Vec<Assignment>> {
        let result = Assignments::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| AssignFlowError::database_operation(format!("查询作业列表失败: {e}")))?;

        result.into_iter().map(|m| m.into_assignment()).collect()
    }

    /// 列出全部已提交与已批改的作业（不含草稿）
    pub async fn list_submitted_and_graded_assignments_impl(&self) -> Result<Vec<Assignment>> {
        let result = Assignments::find()
            .filter(Column::State.ne(AssignmentState::DRAFT))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| AssignFlowError::database_operation(format!("查询作业列表失败: {e}")))?;

        result.into_iter().map(|m| m.into_assignment()).collect()
    }
}
