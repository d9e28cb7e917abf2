use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::LoginRequest;
use crate::services::AuthService;

static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

// 用户登录
pub async fn login(req: HttpRequest, body: web::Json<LoginRequest>) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login(body.into_inner(), &req).await
}

// 当前用户信息
pub async fn profile(req: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.profile(&req).await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .service(web::resource("/login").route(web::post().to(login)))
            .service(
                web::resource("/profile")
                    .wrap(middlewares::RequireJWT)
                    .route(web::get().to(profile)),
            ),
    );
}
