//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc},
    options::IndexOptions,
};
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::Product;
use crate::repository::{ProductRepository, new_product_id};

pub const DEFAULT_COLLECTION: &str = "products";

/// MongoDB implementation of the ProductRepository
///
/// Documents are keyed by the product id (`_id`). Ids are UUID v7 strings,
/// so sorting on `_id` gives insertion order.
#[derive(Clone)]
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, DEFAULT_COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Product>(collection_name);
        Self { collection }
    }

    /// Creates the non-unique `type` index used by type lookups.
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "type": 1 })
            .options(IndexOptions::builder().name("idx_type".to_string()).build())
            .build();

        self.collection.create_index(index).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    fn id_filter(id: &str) -> Document {
        doc! { "_id": id }
    }

    fn type_filter(product_type: &str) -> Document {
        doc! { "type": product_type }
    }

    fn insertion_order() -> Document {
        doc! { "_id": 1 }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, product), fields(product_id = ?product.id()))]
    async fn save(&self, mut product: Product) -> ProductResult<Product> {
        let id = match product.id() {
            Some(id) => id.to_string(),
            None => {
                let id = new_product_id();
                product.set_id(id.clone());
                id
            }
        };

        self.collection
            .replace_one(Self::id_filter(&id), &product)
            .upsert(true)
            .await?;

        tracing::debug!(product_id = %id, "Product saved");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one(Self::id_filter(id)).await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn find_by_type(&self, product_type: &str) -> ProductResult<Option<Product>> {
        let product = self
            .collection
            .find_one(Self::type_filter(product_type))
            .sort(Self::insertion_order())
            .await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(Self::insertion_order())
            .await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        Ok(products)
    }

    #[instrument(skip(self, product), fields(product_id = ?product.id()))]
    async fn delete(&self, product: &Product) -> ProductResult<()> {
        let Some(id) = product.id() else {
            return Ok(());
        };

        let result = self.collection.delete_one(Self::id_filter(id)).await?;
        if result.deleted_count == 0 {
            tracing::debug!(product_id = %id, "Product already removed");
        }
        Ok(())
    }
}
