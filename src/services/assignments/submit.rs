//! 提交作业：DRAFT -> SUBMITTED

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{
    AssignmentService, access, access_denied_response, concurrent_update_response,
    storage_error_response, transition_rejected_response,
};
use crate::models::assignments::requests::SubmitAssignmentRequest;
use crate::models::{ApiResponse, ErrorCode};

/// POST /student/assignments/submit
pub async fn submit_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    student_id: i64,
    req: SubmitAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let mut assignment = match storage.get_assignment_by_id(req.id).await {
        Ok(Some(a)) => a,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "Assignment not found or access denied.",
            )));
        }
        Err(e) => return Ok(storage_error_response("查询作业失败", &e)),
    };

    if let Err(denied) = access::student_owns_for_submit(student_id, &assignment) {
        return Ok(access_denied_response(denied));
    }

    // 目标教师必须存在且确为教师角色
    match storage.get_user_by_id(req.teacher_id).await {
        Ok(Some(user)) if user.role == crate::models::users::entities::UserRole::Teacher => {}
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::TeacherNotFound,
                "Teacher not found",
            )));
        }
        Err(e) => return Ok(storage_error_response("查询教师失败", &e)),
    }

    let previous_state = assignment.state;
    if let Err(e) = assignment.submit_to(req.teacher_id) {
        return Ok(transition_rejected_response(&e));
    }

    match storage.update_assignment(&assignment, previous_state).await {
        Ok(Some(updated)) => Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "提交成功"))),
        Ok(None) => Ok(concurrent_update_response()),
        Err(e) => Ok(storage_error_response("提交作业失败", &e)),
    }
}
