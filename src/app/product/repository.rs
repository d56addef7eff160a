//! 产品仓储

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use super::error::{ProductError, Result};
use super::model::Product;

/// 产品仓储接口，可替换为数据库等其他实现
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Product>>;
    async fn get_by_id(&self, id: i64) -> Result<Product>;
    /// 忽略调用方给出的 id，分配新 id 后追加到末尾，返回分配的 id
    async fn create(&self, product: Product) -> Result<i64>;
    async fn update(&self, id: i64, product: Product) -> Result<()>;
    async fn patch(&self, id: i64, product: Product) -> Result<()>;
    async fn delete(&self, id: i64) -> Result<()>;
    async fn count(&self) -> Result<usize>;
}

/// 基于内存的产品仓储，启动时从 JSON 文件加载
pub struct InMemoryProductRepository {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductRepository {
    /// 从 JSON 数组文件加载；失败时不产生任何部分状态
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ProductError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let products: Vec<Product> =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| {
                ProductError::Decode {
                    path: path.to_path_buf(),
                    source,
                }
            })?;

        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(ProductError::DuplicateId(product.id));
            }
        }

        debug!("从 {} 加载 {} 个产品", path.display(), products.len());
        Ok(Self::from_products(products))
    }

    pub fn from_products(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
        }
    }

    fn next_id(products: &[Product]) -> Result<i64> {
        products
            .iter()
            .map(|p| p.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or(ProductError::IdExhausted)
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn get_all(&self) -> Result<Vec<Product>> {
        Ok(self.products.read().clone())
    }

    async fn get_by_id(&self, id: i64) -> Result<Product> {
        self.products
            .read()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(ProductError::NotFound(id))
    }

    async fn create(&self, mut product: Product) -> Result<i64> {
        let mut products = self.products.write();
        product.id = Self::next_id(&products)?;
        let id = product.id;
        products.push(product);
        Ok(id)
    }

    async fn update(&self, id: i64, mut product: Product) -> Result<()> {
        let mut products = self.products.write();
        let slot = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ProductError::NotFound(id))?;
        product.id = id;
        *slot = product;
        Ok(())
    }

    async fn patch(&self, id: i64, product: Product) -> Result<()> {
        let mut products = self.products.write();
        let existing = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ProductError::NotFound(id))?;
        existing.merge_from(&product);
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut products = self.products.write();
        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or(ProductError::NotFound(id))?;
        products.remove(index);
        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.products.read().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn seeded() -> InMemoryProductRepository {
        InMemoryProductRepository::from_products(vec![
            Product::new("Widget", 10.5, 3).with_id(1),
            Product::new("Bolt", 0.25, 100).with_id(4),
            Product::new("Gear", 7.0, 12).with_id(2),
        ])
    }

    fn seed_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_from_file() {
        let file = seed_file(r#"[{"id":1,"name":"Widget","price":10.5,"quantity":3,"code_value":"W1"}]"#);
        let repo = InMemoryProductRepository::load(file.path()).unwrap();
        let products = repo.products.read();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].extra["code_value"], "W1");
    }

    #[test]
    fn test_load_errors() {
        let missing = InMemoryProductRepository::load("/nonexistent/products.json");
        assert!(matches!(missing, Err(ProductError::Io { .. })));

        let file = seed_file(r#"{"id":1}"#);
        let not_array = InMemoryProductRepository::load(file.path());
        assert!(matches!(not_array, Err(ProductError::Decode { .. })));

        let file = seed_file("null");
        assert!(InMemoryProductRepository::load(file.path()).is_err());

        let file = seed_file(r#"[{"id":1},{"id":1}]"#);
        let duplicate = InMemoryProductRepository::load(file.path());
        assert!(matches!(duplicate, Err(ProductError::DuplicateId(1))));
    }

    #[tokio::test]
    async fn test_empty_file_is_legal() {
        let file = seed_file("[]");
        let repo = InMemoryProductRepository::load(file.path()).unwrap();
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_assigns_max_plus_one() {
        let repo = seeded();
        let id = repo
            .create(Product::new("Gadget", 5.0, 1).with_id(42))
            .await
            .unwrap();
        assert_eq!(id, 5);

        let created = repo.get_by_id(5).await.unwrap();
        assert_eq!(created.name, "Gadget");
        assert!(matches!(repo.get_by_id(42).await, Err(ProductError::NotFound(42))));

        let all = repo.get_all().await.unwrap();
        assert_eq!(all.last().map(|p| p.id), Some(5));
    }

    #[tokio::test]
    async fn test_create_fails_when_ids_exhausted() {
        let repo = InMemoryProductRepository::from_products(vec![
            Product::new("Last", 1.0, 1).with_id(i64::MAX),
        ]);
        assert!(matches!(
            repo.create(Product::new("Overflow", 1.0, 1)).await,
            Err(ProductError::IdExhausted)
        ));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_load_treats_null_fields_as_zero() {
        let file = seed_file(r#"[{"id":1,"name":null,"price":null,"quantity":null,"code_value":null}]"#);
        let repo = InMemoryProductRepository::load(file.path()).unwrap();
        let product = repo.get_by_id(1).await.unwrap();
        assert_eq!(product.name, "");
        assert_eq!(product.price, 0.0);
        assert_eq!(product.quantity, 0);
        assert!(product.extra["code_value"].is_null());
    }

    #[tokio::test]
    async fn test_create_on_empty_starts_at_one() {
        let repo = InMemoryProductRepository::from_products(Vec::new());
        assert_eq!(repo.create(Product::new("First", 1.0, 1)).await.unwrap(), 1);
        assert_eq!(repo.create(Product::new("Second", 1.0, 1)).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_update_replaces_record_and_keeps_id() {
        let repo = seeded();
        repo.update(4, Product::new("Nut", 0.1, 0).with_id(99))
            .await
            .unwrap();

        let updated = repo.get_by_id(4).await.unwrap();
        assert_eq!(updated.name, "Nut");
        assert_eq!(updated.quantity, 0);

        let ids: Vec<i64> = repo.get_all().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 4, 2]);

        assert!(matches!(
            repo.update(7, Product::default()).await,
            Err(ProductError::NotFound(7))
        ));
    }

    #[tokio::test]
    async fn test_patch_only_non_zero_fields() {
        let repo = seeded();
        repo.patch(1, Product::default()).await.unwrap();
        assert_eq!(
            repo.get_by_id(1).await.unwrap(),
            Product::new("Widget", 10.5, 3).with_id(1)
        );

        repo.patch(1, Product::new("Widget XL", 0.0, 9)).await.unwrap();
        let patched = repo.get_by_id(1).await.unwrap();
        assert_eq!(patched.name, "Widget XL");
        assert_eq!(patched.price, 10.5);
        assert_eq!(patched.quantity, 9);

        assert!(repo.patch(8, Product::default()).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_preserves_order() {
        let repo = seeded();
        repo.delete(4).await.unwrap();

        assert!(matches!(repo.get_by_id(4).await, Err(ProductError::NotFound(4))));
        let ids: Vec<i64> = repo.get_all().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);

        assert!(matches!(repo.delete(4).await, Err(ProductError::NotFound(4))));
        assert_eq!(repo.count().await.unwrap(), 2);
    }
}
