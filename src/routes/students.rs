use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireJWT};
use crate::models::assignments::requests::{SubmitAssignmentRequest, UpsertAssignmentRequest};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::AssignmentService;
use crate::utils::SafeIDI64;

// 懒加载的全局 AssignmentService 实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::Unauthorized,
        "无法获取用户信息",
    ))
}

// 列出学生的全部作业
pub async fn list_assignments(req: HttpRequest) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(&req) else {
        return Ok(unauthorized());
    };

    ASSIGNMENT_SERVICE.list_student_assignments(&req, user_id).await
}

// 列出处于已提交状态的作业
pub async fn list_submitted_assignments(req: HttpRequest) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(&req) else {
        return Ok(unauthorized());
    };

    ASSIGNMENT_SERVICE.list_submitted_assignments(&req, user_id).await
}

// 查看作业详情
pub async fn get_assignment(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(&req) else {
        return Ok(unauthorized());
    };

    ASSIGNMENT_SERVICE.get_student_assignment(&req, user_id, path.0).await
}

// 创建或编辑草稿
pub async fn upsert_assignment(
    req: HttpRequest,
    body: web::Json<UpsertAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(&req) else {
        return Ok(unauthorized());
    };

    ASSIGNMENT_SERVICE.upsert_draft(&req, user_id, body.into_inner()).await
}

// 提交作业给指定教师
pub async fn submit_assignment(
    req: HttpRequest,
    body: web::Json<SubmitAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(&req) else {
        return Ok(unauthorized());
    };

    ASSIGNMENT_SERVICE.submit_assignment(&req, user_id, body.into_inner()).await
}

// 删除草稿
pub async fn delete_assignment(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(&req) else {
        return Ok(unauthorized());
    };

    ASSIGNMENT_SERVICE.delete_draft(&req, user_id, path.0).await
}

// 配置路由
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/student")
            // wrap 自内向外执行：先验证 JWT，再验证学生角色
            .wrap(middlewares::RequireRole::new(&UserRole::Student))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/assignments")
                    .route(web::get().to(list_assignments))
                    .route(web::post().to(upsert_assignment)),
            )
            .service(
                web::resource("/assignments/submitted")
                    .route(web::get().to(list_submitted_assignments)),
            )
            .service(
                web::resource("/assignments/submit").route(web::post().to(submit_assignment)),
            )
            .service(
                web::resource("/assignments/{id}")
                    .route(web::get().to(get_assignment))
                    .route(web::delete().to(delete_assignment)),
            ),
    );
}
