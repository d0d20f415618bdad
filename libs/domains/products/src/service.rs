//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::{info, instrument};

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductBuilder, ProductDto};
use crate::repository::ProductRepository;

/// Product operations over a repository, in terms of [`ProductDto`].
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Validates and stores a new product. Any `id` in `input` is ignored.
    #[instrument(skip(self, input), fields(title = ?input.title))]
    pub async fn create(&self, input: ProductDto) -> ProductResult<ProductDto> {
        let product = ProductBuilder::from(input).build()?;

        let created = self.repository.save(product).await?;
        info!(product_id = ?created.id(), "Product created");
        Ok(created.into())
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: &str) -> ProductResult<ProductDto> {
        let product = self.find_product(id).await?;
        info!("Product found by id");
        Ok(product.into())
    }

    #[instrument(skip(self))]
    pub async fn find_by_type(&self, product_type: &str) -> ProductResult<ProductDto> {
        let product = self
            .repository
            .find_by_type(product_type)
            .await?
            .ok_or_else(|| ProductError::not_found_by_type(product_type))?;
        info!(product_id = ?product.id(), "Product found by type");
        Ok(product.into())
    }

    /// Looks `key` up as an id first, then as a type.
    ///
    /// A miss on both is reported as not found by id.
    #[instrument(skip(self))]
    pub async fn find_by_key(&self, key: &str) -> ProductResult<ProductDto> {
        if let Some(product) = self.repository.find_by_id(key).await? {
            info!("Product found by id");
            return Ok(product.into());
        }

        match self.repository.find_by_type(key).await? {
            Some(product) => {
                info!(product_id = ?product.id(), "Product found by type");
                Ok(product.into())
            }
            None => Err(ProductError::not_found_by_id(key)),
        }
    }

    #[instrument(skip(self))]
    pub async fn find_all(&self) -> ProductResult<Vec<ProductDto>> {
        let products = self.repository.find_all().await?;
        info!(count = products.len(), "Products listed");
        Ok(products.into_iter().map(ProductDto::from).collect())
    }

    /// Replaces the mutable fields of the product identified by `input.id`.
    #[instrument(skip(self, input), fields(product_id = ?input.id))]
    pub async fn update(&self, input: ProductDto) -> ProductResult<ProductDto> {
        let id = input.id.ok_or_else(|| ProductError::NullArgument {
            field: "id".to_string(),
            message: "Id cannot be null".to_string(),
        })?;

        let mut product = self.find_product(&id).await?;
        product.update(
            input.title,
            input.description,
            input.price,
            input.product_type,
        )?;

        let updated = self.repository.save(product).await?;
        info!("Product updated");
        Ok(updated.into())
    }

    /// Removes the product and returns its last stored values.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> ProductResult<ProductDto> {
        let product = self.find_product(id).await?;
        self.repository.delete(&product).await?;
        info!("Product deleted");
        Ok(product.into())
    }

    async fn find_product(&self, id: &str) -> ProductResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ProductError::not_found_by_id(id))
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
