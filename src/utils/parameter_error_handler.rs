//! 请求参数错误处理器
//!
//! 把 actix-web 默认的参数解析错误改写为统一的 ApiResponse 信封。

use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::{Error, HttpRequest, HttpResponse};

use crate::models::{ApiResponse, ErrorCode};

/// JSON 请求体解析错误处理器
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    let message = match &err {
        JsonPayloadError::ContentType => "请求 Content-Type 必须为 application/json".to_string(),
        JsonPayloadError::Deserialize(e) => format!("JSON 解析失败: {e}"),
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            "请求体过大".to_string()
        }
        other => format!("请求体读取失败: {other}"),
    };

    let response = HttpResponse::BadRequest()
        .json(ApiResponse::error_empty(ErrorCode::InvalidJsonBody, message));

    InternalError::from_response(err, response).into()
}

/// 查询参数解析错误处理器
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> Error {
    let message = match &err {
        QueryPayloadError::Deserialize(e) => format!("查询参数解析失败: {e}"),
        other => format!("查询参数读取失败: {other}"),
    };

    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::InvalidQueryParams,
        message,
    ));

    InternalError::from_response(err, response).into()
}
