//! 请求参数错误处理器
//!
//! 把 actix 默认的 JSON / Query 解析错误统一包装成 ApiResponse 格式，
//! 校验失败（例如非法的 grade 枚举值）会带上 serde 的字段级错误信息。

use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::{Error, HttpRequest, HttpResponse};

use crate::models::{ApiResponse, ErrorCode};

/// JSON 请求体错误处理器
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    let message = match &err {
        JsonPayloadError::ContentType => "Content-Type must be application/json".to_string(),
        JsonPayloadError::Deserialize(e) => format!("Invalid JSON payload: {e}"),
        other => format!("Invalid request payload: {other}"),
    };

    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::ValidationError,
        message,
    ));

    InternalError::from_response(err, response).into()
}

/// 查询参数错误处理器
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> Error {
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::ValidationError,
        format!("Invalid query parameters: {err}"),
    ));

    InternalError::from_response(err, response).into()
}
