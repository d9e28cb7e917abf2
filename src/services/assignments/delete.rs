//! 删除草稿

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{
    AssignmentService, access, access_denied_response, storage_error_response,
    transition_rejected_response,
};
use crate::models::{ApiResponse, ErrorCode};

/// DELETE /student/assignments/{id}
pub async fn delete_draft(
    service: &AssignmentService,
    request: &HttpRequest,
    student_id: i64,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let assignment = match storage.get_assignment_by_id(assignment_id).await {
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

    if let Err(e) = assignment.ensure_deletable() {
        return Ok(transition_rejected_response(&e));
    }

    match storage.delete_assignment(assignment_id).await {
        Ok(true) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success_empty("Assignment deleted successfully."))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        ))),
        Err(e) => Ok(storage_error_response("删除作业失败", &e)),
    }
}
