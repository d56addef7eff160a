//! # 产品 API
//!
//! 基于 Axum 的产品 CRUD 与搜索服务，数据在启动时从 JSON 文件加载到内存：
//! - app: 产品模型、仓储、服务、处理器与路由
//! - core: 错误处理、中间件与通用响应
//! - infrastructure: 配置与日志

pub mod app;
pub mod core;
pub mod infrastructure;

pub use app::{build_router, AppState};
