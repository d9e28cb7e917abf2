/*!
 * 基于角色的访问控制中间件
 *
 * 此中间件必须在 RequireJWT 中间件之后使用，用于验证用户是否具有特定角色权限。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * web::scope("/api/v1/principal")
 *     .wrap(RequireRole::new(&UserRole::Principal))
 *     .wrap(RequireJWT)  // wrap 自内向外执行，JWT 验证必须先行
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::{
    middlewares::RequireJWT,
    models::{
        ErrorCode,
        users::entities::{self, UserRole},
    },
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireRole {
    required_role: UserRole,
}

impl RequireRole {
    /// 创建需要特定角色的中间件
    pub fn new(role: &UserRole) -> Self {
        Self {
            required_role: role.clone(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            required_role: self.required_role.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    required_role: UserRole,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
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
        let required_role = self.required_role.clone();

        Box::pin(async move {
            // 从请求扩展中获取用户信息
            let user_claims = req.extensions().get::<entities::User>().cloned();

            match user_claims {
                Some(claims) => {
                    let user_sub = claims.id;
                    let user_role = RequireJWT::extract_user_role(req.request());
                    let has_permission = user_role.as_ref() == Some(&required_role);

                    if has_permission {
                        let res = srv.call(req).await?.map_into_left_body();
                        Ok(res)
                    } else {
                        info!(
                            "Access denied for user {} (role: {:?}). Required role: {:?}",
                            user_sub, user_role, required_role
                        );
                        Ok(req.into_response(
                            create_error_response(
                                StatusCode::FORBIDDEN,
                                ErrorCode::Forbidden,
                                "Access denied.",
                            )
                            .map_into_right_body(),
                        ))
                    }
                }
                None => {
                    info!(
                        "Role check failed: No user claims found in request. Make sure RequireJWT middleware is applied first."
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Authentication required",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}
