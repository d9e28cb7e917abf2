use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireJWT};
use crate::models::assignments::requests::{GradeAssignmentRequest, RegradeAssignmentRequest};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{AssignmentService, TeacherService};
use crate::utils::SafeIDI64;

static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);
static TEACHER_SERVICE: Lazy<TeacherService> = Lazy::new(TeacherService::new_lazy);

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::Unauthorized,
        "无法获取用户信息",
    ))
}

fn payload_not_found() -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::PayloadNotFound,
        "Payload not found",
    ))
}

// 列出全部已提交与已批改的作业
pub async fn list_assignments(req: HttpRequest) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.list_principal_assignments(&req).await
}

// 批改任意非草稿作业
pub async fn grade_assignment(
    req: HttpRequest,
    body: Option<web::Json<GradeAssignmentRequest>>,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_user_claims(&req) else {
        return Ok(unauthorized());
    };

    // 请求体缺失时与历史行为保持一致
    let Some(body) = body else {
        return Ok(payload_not_found());
    };

    ASSIGNMENT_SERVICE.grade_assignment(&req, &user, body.into_inner()).await
}

// 复批已批改的作业
pub async fn regrade_assignment(
    req: HttpRequest,
    path: SafeIDI64,
    body: Option<web::Json<RegradeAssignmentRequest>>,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_user_claims(&req) else {
        return Ok(unauthorized());
    };

    let Some(body) = body else {
        return Ok(payload_not_found());
    };

    ASSIGNMENT_SERVICE
        .regrade_assignment(&req, &user, path.0, body.into_inner())
        .await
}

// 列出全部教师
pub async fn list_teachers(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.list_teachers(&req).await
}

// 配置路由
pub fn configure_principal_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/principal")
            // wrap 自内向外执行：先验证 JWT，再验证校长角色
            .wrap(middlewares::RequireRole::new(&UserRole::Principal))
            .wrap(middlewares::RequireJWT)
            .service(web::resource("/assignments").route(web::get().to(list_assignments)))
            .service(web::resource("/assignments/grade").route(web::post().to(grade_assignment)))
            .service(
                web::resource("/assignments/{id}/regrade")
                    .route(web::put().to(regrade_assignment)),
            )
            .service(web::resource("/teachers").route(web::get().to(list_teachers))),
    );
}
