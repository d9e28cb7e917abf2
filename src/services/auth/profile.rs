use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, auth::UserInfoResponse};

/// GET /auth/profile
pub async fn handle_profile(request: &HttpRequest) -> ActixResult<HttpResponse> {
    match RequireJWT::extract_user_claims(request) {
        Some(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserInfoResponse { user },
            "查询成功",
        ))),
        None => Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "无法获取用户信息",
        ))),
    }
}
