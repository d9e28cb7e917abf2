/*!
 * JWT 认证中间件
 *
 * 此中间件用于验证 JWT 令牌的有效性，确保只有经过身份验证的用户才能访问受保护的路由。
 *
 * ## 使用方法
 *
 * 1. 在路由上应用中间件：
 * ```rust,ignore
 * web::scope("/api/v1/student")
 *     .wrap(RequireJWT)
 *     .route("/assignments", web::get().to(list_assignments))
 * ```
 *
 * 2. 在处理程序中提取用户信息：
 * ```rust,ignore
 * if let Some(user) = RequireJWT::extract_user_claims(&req) {
 *     // user.id / user.role 可用
 * }
 * ```
 *
 * ## 认证流程
 *
 * 1. 客户端在请求头中包含 `Authorization: Bearer <JWT_TOKEN>`
 * 2. 中间件提取并验证JWT令牌，从存储加载对应用户
 * 3. 如果令牌有效，将用户信息存储在请求扩展中，继续处理请求
 * 4. 如果令牌无效或缺失，返回401未授权错误
 */

use crate::models::{ErrorCode, users::entities};
use crate::storage::Storage;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone)]
pub struct RequireJWT;

// 辅助函数：提取并验证 JWT access token，加载对应用户
async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<entities::User, String> {
    let token = req
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| "Missing or invalid Authorization header".to_string())?;

    let claims = crate::utils::jwt::JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        "Invalid JWT token".to_string()
    })?;

    let user_id = claims
        .sub
        .parse::<i64>()
        .map_err(|_| "Invalid user ID in JWT".to_string())?;

    let storage = req
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone();

    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|_| "Failed to retrieve user from storage".to_string())?
        .ok_or_else(|| "User not found".to_string())?;

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            // 验证 JWT token
            match extract_and_validate_jwt(&req).await {
                Ok(user) => {
                    debug!("JWT authentication successful for ID: {}", user.id);
                    // 将用户信息添加到请求扩展中，供后续处理程序使用
                    req.extensions_mut().insert(user);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取用户信息
impl RequireJWT {
    /// 从请求扩展中提取用户信息
    /// 此函数应该在应用了RequireJWT中间件的路由处理程序中使用
    pub fn extract_user_claims(req: &actix_web::HttpRequest) -> Option<entities::User> {
        req.extensions().get::<entities::User>().cloned()
    }

    /// 从请求扩展中提取用户ID
    pub fn extract_user_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<entities::User>().map(|user| user.id)
    }

    /// 从请求扩展中提取用户角色
    pub fn extract_user_role(req: &actix_web::HttpRequest) -> Option<entities::UserRole> {
        req.extensions()
            .get::<entities::User>()
            .map(|user| user.role.clone())
    }
}
