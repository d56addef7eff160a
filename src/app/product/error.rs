//! 产品领域错误

use std::path::PathBuf;

/// 仓储与服务层错误，原样传递到处理器层再映射为 HTTP 状态码
#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("读取产品文件 {} 失败: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("解析产品文件 {} 失败: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("产品文件中存在重复的 id: {0}")]
    DuplicateId(i64),
    #[error("产品 {0} 不存在")]
    NotFound(i64),
    #[error("产品 id 已用尽，无法分配新 id")]
    IdExhausted,
    #[error("产品集合未初始化")]
    EmptyCollection,
}

pub type Result<T> = std::result::Result<T, ProductError>;
