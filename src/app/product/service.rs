//! 产品业务服务

use std::sync::Arc;

use async_trait::async_trait;

use super::error::Result;
use super::model::Product;
use super::repository::ProductRepository;

/// 产品服务接口
#[async_trait]
pub trait ProductService: Send + Sync {
    async fn get_all_products(&self) -> Result<Vec<Product>>;
    async fn get_product_by_id(&self, id: i64) -> Result<Product>;
    /// 返回价格严格大于 `price_gt` 的产品，保持原有顺序
    async fn search_product(&self, price_gt: f64) -> Result<Vec<Product>>;
    async fn create_product(&self, product: Product) -> Result<i64>;
    async fn update_product(&self, id: i64, product: Product) -> Result<()>;
    async fn patch_product(&self, id: i64, product: Product) -> Result<()>;
    async fn delete_product(&self, id: i64) -> Result<()>;
    async fn count_products(&self) -> Result<usize>;
}

/// 默认实现：直接委托给仓储，只额外承担价格过滤
#[derive(Clone)]
pub struct DefaultProductService {
    repository: Arc<dyn ProductRepository>,
}

impl DefaultProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ProductService for DefaultProductService {
    async fn get_all_products(&self) -> Result<Vec<Product>> {
        self.repository.get_all().await
    }

    async fn get_product_by_id(&self, id: i64) -> Result<Product> {
        self.repository.get_by_id(id).await
    }

    async fn search_product(&self, price_gt: f64) -> Result<Vec<Product>> {
        let products = self.repository.get_all().await?;
        Ok(products.into_iter().filter(|p| p.price > price_gt).collect())
    }

    async fn create_product(&self, product: Product) -> Result<i64> {
        self.repository.create(product).await
    }

    async fn update_product(&self, id: i64, product: Product) -> Result<()> {
        self.repository.update(id, product).await
    }

    async fn patch_product(&self, id: i64, product: Product) -> Result<()> {
        self.repository.patch(id, product).await
    }

    async fn delete_product(&self, id: i64) -> Result<()> {
        self.repository.delete(id).await
    }

    async fn count_products(&self) -> Result<usize> {
        self.repository.count().await
    }
}
