//! 核心错误处理模块

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::app::product::error::ProductError;

/// 核心错误类型
#[derive(Debug)]
pub enum CoreError {
    BadRequest(String),
    Unauthorized,
    NotFound(String),
    InternalServerError(String),
}

/// 错误响应结构
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: u16,
    pub timestamp: String,
}

impl CoreError {
    /// 写操作路由上仓储错误一律按 500 返回
    pub fn internal(err: ProductError) -> Self {
        CoreError::InternalServerError(err.to_string())
    }
}

/// 查询路由的默认映射：不存在为 404，其余为 500
impl From<ProductError> for CoreError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => CoreError::NotFound(err.to_string()),
            other => CoreError::internal(other),
        }
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let (status, error_message, user_message) = match self {
            CoreError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            // 鉴权失败只返回纯文本
            CoreError::Unauthorized => {
                return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
            }
            CoreError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            CoreError::InternalServerError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                msg,
            ),
        };

        let error_response = ErrorResponse {
            error: error_message.to_string(),
            message: user_message,
            code: status.as_u16(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, axum::Json(error_response)).into_response()
    }
}
