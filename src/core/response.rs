//! 核心响应处理模块

use serde::Serialize;

/// 简单消息响应，如 `{"message":"product deleted"}`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub products: usize,
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy(products: usize) -> Self {
        Self {
            status: "healthy",
            products,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
