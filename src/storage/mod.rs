use std::sync::Arc;

use crate::models::{
    assignments::entities::{Assignment, AssignmentState},
    users::{entities::User, requests::CreateUserRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 列出全部教师
    async fn list_teachers(&self) -> Result<Vec<User>>;
    // 统计用户数
    async fn count_users(&self) -> Result<u64>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;

    /// 作业管理方法
    // 通过ID获取作业
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>>;
    // 创建草稿作业
    async fn create_assignment(&self, student_id: i64, content: String) -> Result<Assignment>;
    // 持久化作业变更；expected 为读取时的状态，作为乐观并发守卫，
    // 守卫未命中（并发修改）时返回 None
    async fn update_assignment(
        &self,
        assignment: &Assignment,
        expected: AssignmentState,
    ) -> Result<Option<Assignment>>;
    // 删除作业
    async fn delete_assignment(&self, id: i64) -> Result<bool>;
    // 列出学生的全部作业
    async fn list_assignments_by_student(&self, student_id: i64) -> Result<Vec<Assignment>>;
    // 列出学生处于已提交状态的作业（不含已批改）
    async fn list_submitted_assignments_by_student(
        &self,
        student_id: i64,
    ) -> Result<Vec<Assignment>>;
    // 列出提交给某教师的作业
    async fn list_assignments_by_teacher(&self, teacher_id: i64) -> Result<Vec<Assignment>>;
    // 列出全部已提交与已批改的作业（校长视图，不含草稿）
    async fn list_submitted_and_graded_assignments(&self) -> Result<Vec<Assignment>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
