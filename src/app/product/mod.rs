//! 产品资源：模型、仓储、服务与处理器

pub mod error;
pub mod handler;
pub mod model;
pub mod repository;
pub mod service;

pub use error::ProductError;
pub use model::Product;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::{DefaultProductService, ProductService};
