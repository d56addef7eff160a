//! 核心中间件模块

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, warn};

use super::error::CoreError;
use crate::app::AppState;

/// 请求日志中间件
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let received_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;
    let status = response.status();
    let duration = start.elapsed();

    info!(
        "{} {} - {} - {}ms - 接收时间: {}",
        method,
        uri,
        status,
        duration.as_millis(),
        received_at
    );

    response
}

/// 写操作鉴权中间件：`Authorization` 头必须与配置的令牌完全一致
pub async fn token_auth_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, CoreError> {
    let token = req
        .headers()
        .get("authorization")
        .map(|h| h.as_bytes())
        .unwrap_or_default();

    if token != state.api_token.as_bytes() {
        warn!("拒绝未授权请求: {} {}", req.method(), req.uri().path());
        return Err(CoreError::Unauthorized);
    }

    Ok(next.run(req).await)
}
