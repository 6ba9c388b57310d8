use async_trait::async_trait;

use crate::error::Result;
use crate::product::{Category, NewProduct, Product, ProductAttribute, ProductDetail};

/// Persistence for product rows.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Insert a new product and return it with its assigned id.
    async fn insert(&self, product: NewProduct) -> Result<Product>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>>;

    /// Look up a product by exact title.
    async fn find_by_title(&self, title: &str) -> Result<Option<Product>>;

    /// Load one product together with its category and attribute values.
    async fn find_with_relations(&self, id: i32) -> Result<Option<ProductDetail>>;

    /// Load every product with relations, ascending by id.
    async fn find_all_with_relations(&self) -> Result<Vec<ProductDetail>>;

    /// Load every product without relations, descending by id.
    async fn find_all_newest_first(&self) -> Result<Vec<Product>>;

    /// Persist the scalar fields of an existing product.
    async fn save(&self, product: Product) -> Result<Product>;

    /// Delete a product and its attribute values.
    ///
    /// Returns the number of product rows removed (`0` if the id did not exist).
    async fn delete(&self, id: i32) -> Result<u64>;
}

/// Persistence for `(product_id, attribute_id, value)` triples.
#[async_trait]
pub trait AttributeValueStore: Send + Sync {
    async fn find(&self, product_id: i32, attribute_id: i32) -> Result<Option<ProductAttribute>>;

    /// Insert the row, or overwrite the value of the existing row with the same key.
    async fn upsert(&self, row: ProductAttribute) -> Result<ProductAttribute>;
}

/// Resolves category ids owned by the category component.
#[async_trait]
pub trait CategoryLookup: Send + Sync {
    /// Fails with `CatalogError::CategoryNotFound` when the id does not resolve.
    async fn find_by_id(&self, id: i32) -> Result<Category>;
}
