//! 路径参数安全提取器
//!
//! 直接使用 `web::Path<i64>` 时解析失败会返回框架默认错误，
//! 这里统一替换为 ApiResponse 格式的 400 响应。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

/// 从路径 `{id}` 提取正整数 ID
pub struct SafeIDI64(pub i64);

impl FromRequest for SafeIDI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let parsed = req
            .match_info()
            .get("id")
            .and_then(|raw| raw.parse::<i64>().ok());

        ready(match parsed {
            Some(id) if id > 0 => Ok(SafeIDI64(id)),
            _ => {
                let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::BadRequest,
                    "Invalid id in path",
                ));
                Err(InternalError::from_response("Invalid id in path", response).into())
            }
        })
    }
}
