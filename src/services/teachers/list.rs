//! 教师列表（校长视图）

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::{ApiResponse, ErrorCode};

/// GET /principal/teachers
pub async fn list_teachers(
    service: &TeacherService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_teachers().await {
        Ok(teachers) => Ok(HttpResponse::Ok().json(ApiResponse::success(teachers, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询教师列表失败: {e}"),
            )),
        ),
    }
}
