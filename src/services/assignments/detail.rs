//! 作业详情

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, access, access_denied_response, storage_error_response};
use crate::models::{ApiResponse, ErrorCode};

/// 学生查看自己的作业详情
/// GET /student/assignments/{id}
pub async fn get_student_assignment(
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

    Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "查询成功")))
}

/// 教师查看提交给自己的作业详情
/// GET /teacher/assignments/{id}
///
/// 这是唯一区分"不存在"（404）与"存在但不属于你"（403）的入口。
pub async fn get_teacher_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    teacher_id: i64,
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

    if let Err(denied) = access::teacher_can_view(teacher_id, &assignment) {
        return Ok(access_denied_response(denied));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "查询成功")))
}
