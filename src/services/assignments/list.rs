//! 角色限定的作业列表

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, storage_error_response};
use crate::models::ApiResponse;

/// 学生的全部作业（含草稿）
/// GET /student/assignments
pub async fn list_student_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_assignments_by_student(student_id).await {
        Ok(assignments) => Ok(HttpResponse::Ok().json(ApiResponse::success(assignments, "查询成功"))),
        Err(e) => Ok(storage_error_response("查询作业列表失败", &e)),
    }
}

/// 学生处于已提交状态的作业
/// GET /student/assignments/submitted
pub async fn list_submitted_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .list_submitted_assignments_by_student(student_id)
        .await
    {
        Ok(assignments) => Ok(HttpResponse::Ok().json(ApiResponse::success(assignments, "查询成功"))),
        Err(e) => Ok(storage_error_response("查询作业列表失败", &e)),
    }
}

/// 提交给教师本人的作业
/// GET /teacher/assignments
pub async fn list_teacher_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    teacher_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_assignments_by_teacher(teacher_id).await {
        Ok(assignments) => Ok(HttpResponse::Ok().json(ApiResponse::success(assignments, "查询成功"))),
        Err(e) => Ok(storage_error_response("查询作业列表失败", &e)),
    }
}

/// 校长视图：全部已提交与已批改的作业，草稿永不出现
/// GET /principal/assignments
pub async fn list_principal_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_submitted_and_graded_assignments().await {
        Ok(assignments) => Ok(HttpResponse::Ok().json(ApiResponse::success(assignments, "查询成功"))),
        Err(e) => Ok(storage_error_response("查询作业列表失败", &e)),
    }
}
