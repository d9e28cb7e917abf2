use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireJWT};
use crate::models::assignments::requests::GradeAssignmentRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::AssignmentService;
use crate::utils::SafeIDI64;

static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::Unauthorized,
        "无法获取用户信息",
    ))
}

// 列出提交给教师本人的作业
pub async fn list_assignments(req: HttpRequest) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(&req) else {
        return Ok(unauthorized());
    };

    ASSIGNMENT_SERVICE.list_teacher_assignments(&req, user_id).await
}

// 查看作业详情（仅提交给本人的作业）
pub async fn get_assignment(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(&req) else {
        return Ok(unauthorized());
    };

    ASSIGNMENT_SERVICE.get_teacher_assignment(&req, user_id, path.0).await
}

// 批改作业
pub async fn grade_assignment(
    req: HttpRequest,
    body: web::Json<GradeAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_user_claims(&req) else {
        return Ok(unauthorized());
    };

    ASSIGNMENT_SERVICE.grade_assignment(&req, &user, body.into_inner()).await
}

// 配置路由
pub fn configure_teacher_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/teacher")
            // wrap 自内向外执行：先验证 JWT，再验证教师角色
            .wrap(middlewares::RequireRole::new(&UserRole::Teacher))
            .wrap(middlewares::RequireJWT)
            .service(web::resource("/assignments").route(web::get().to(list_assignments)))
            .service(web::resource("/assignments/grade").route(web::post().to(grade_assignment)))
            .service(web::resource("/assignments/{id}").route(web::get().to(get_assignment))),
    );
}
