use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::Product;

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert or replace a product, assigning an id on first save
    async fn save(&self, product: Product) -> ProductResult<Product>;

    async fn find_by_id(&self, id: &str) -> ProductResult<Option<Product>>;

    /// First product with the given type, in insertion order
    async fn find_by_type(&self, product_type: &str) -> ProductResult<Option<Product>>;

    /// All products, in insertion order
    async fn find_all(&self) -> ProductResult<Vec<Product>>;

    /// Remove the product with this product's id; a no-op if already gone
    async fn delete(&self, product: &Product) -> ProductResult<()>;
}

/// New product ids are UUID v7 strings, so they sort by creation time.
pub(crate) fn new_product_id() -> String {
    Uuid::now_v7().to_string()
}

/// In-memory repository for tests and local runs without MongoDB
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn save(&self, mut product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let existing = product
            .id()
            .and_then(|id| products.iter().position(|p| p.id() == Some(id)));

        match existing {
            Some(index) => products[index] = product.clone(),
            None => {
                if product.id().is_none() {
                    product.set_id(new_product_id());
                }
                products.push(product.clone());
            }
        }

        Ok(product)
    }

    async fn find_by_id(&self, id: &str) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id() == Some(id)).cloned())
    }

    async fn find_by_type(&self, product_type: &str) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products
            .iter()
            .find(|p| p.product_type() == Some(product_type))
            .cloned())
    }

    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        Ok(self.products.read().await.clone())
    }

    async fn delete(&self, product: &Product) -> ProductResult<()> {
        if let Some(id) = product.id() {
            self.products.write().await.retain(|p| p.id() != Some(id));
        }
        Ok(())
    }
}
