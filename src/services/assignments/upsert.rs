//! 创建或编辑草稿
//!
//! 按 id 有无决定语义：无 id 新建草稿，有 id 则编辑仍处于草稿
//! 状态的作业。内容只在草稿阶段可变。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{
    AssignmentService, access, access_denied_response, concurrent_update_response,
    storage_error_response, transition_rejected_response,
};
use crate::models::assignments::requests::UpsertAssignmentRequest;
use crate::models::{ApiResponse, ErrorCode};

/// POST /student/assignments
pub async fn upsert_draft(
    service: &AssignmentService,
    request: &HttpRequest,
    student_id: i64,
    req: UpsertAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 内容必填且不可为 null
    let content = match req.content {
        Some(c) if !c.is_empty() => c,
        _ => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationError,
                "Content cannot be null.",
            )));
        }
    };

    // 无 id：新建草稿
    let Some(assignment_id) = req.id else {
        return match storage.create_assignment(student_id, content).await {
            Ok(assignment) => Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "创建成功"))),
            Err(e) => Ok(storage_error_response("创建作业失败", &e)),
        };
    };

    // 有 id：编辑现存草稿
    let mut assignment = match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(a)) => a,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "Assignment not found",
            )));
        }
        Err(e) => return Ok(storage_error_response("查询作业失败", &e)),
    };

    if let Err(denied) = access::student_owns(student_id, &assignment) {
        return Ok(access_denied_response(denied));
    }

    let previous_state = assignment.state;
    if let Err(e) = assignment.replace_content(content) {
        return Ok(transition_rejected_response(&e));
    }

    match storage.update_assignment(&assignment, previous_state).await {
        Ok(Some(updated)) => Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "更新成功"))),
        Ok(None) => Ok(concurrent_update_response()),
        Err(e) => Ok(storage_error_response("更新作业失败", &e)),
    }
}
