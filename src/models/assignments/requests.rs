use serde::Deserialize;

use super::entities::Grade;

// 创建或编辑草稿请求：携带 id 时为编辑，否则为新建
#[derive(Debug, Deserialize)]
pub struct UpsertAssignmentRequest {
    pub id: Option<i64>,
    // 显式区分"缺失"与"null"，两者都按内容为空拒绝
    pub content: Option<String>,
}

// 提交作业请求
#[derive(Debug, Deserialize)]
pub struct SubmitAssignmentRequest {
    pub id: i64,
    pub teacher_id: i64,
}

// 批改作业请求
#[derive(Debug, Deserialize)]
pub struct GradeAssignmentRequest {
    pub id: i64,
    pub grade: Grade,
}

// 复批请求（作业 ID 来自路径）
#[derive(Debug, Deserialize)]
pub struct RegradeAssignmentRequest {
    pub grade: Grade,
}
