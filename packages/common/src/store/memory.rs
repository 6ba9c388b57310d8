use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::traits::{AttributeValueStore, CategoryLookup, ProductStore};
use crate::error::{CatalogError, Result};
use crate::product::{Category, NewProduct, Product, ProductAttribute, ProductDetail};

#[derive(Default)]
struct State {
    products: BTreeMap<i32, Product>,
    attributes: BTreeMap<(i32, i32), ProductAttribute>,
    categories: BTreeMap<i32, Category>,
    next_product_id: i32,
    next_category_id: i32,
}

impl State {
    fn detail(&self, product: &Product) -> ProductDetail {
        ProductDetail {
            product: product.clone(),
            category: self.categories.get(&product.category_id).cloned(),
            attributes: self
                .attributes
                .range((product.id, i32::MIN)..=(product.id, i32::MAX))
                .map(|(_, row)| row.clone())
                .collect(),
        }
    }
}

/// Process-local catalog implementing every store trait.
///
/// Ids are assigned from 1 upwards and never reused, matching a serial
/// primary key. Used by tests and by embedders that do not need a database.
#[derive(Default)]
pub struct InMemoryCatalog {
    state: RwLock<State>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a category and return it with its assigned id.
    pub async fn add_category(&self, name: &str) -> Category {
        let mut state = self.state.write().await;
        state.next_category_id += 1;
        let category = Category {
            id: state.next_category_id,
            name: name.to_string(),
        };
        state.categories.insert(category.id, category.clone());
        category
    }

    /// All attribute rows stored for a product, ordered by attribute id.
    pub async fn attribute_rows(&self, product_id: i32) -> Vec<ProductAttribute> {
        let state = self.state.read().await;
        state
            .attributes
            .range((product_id, i32::MIN)..=(product_id, i32::MAX))
            .map(|(_, row)| row.clone())
            .collect()
    }

    pub async fn attribute_row_count(&self) -> usize {
        self.state.read().await.attributes.len()
    }

    pub async fn product_count(&self) -> usize {
        self.state.read().await.products.len()
    }
}

#[async_trait]
impl ProductStore for InMemoryCatalog {
    async fn insert(&self, product: NewProduct) -> Result<Product> {
        let mut state = self.state.write().await;
        state.next_product_id += 1;
        let now = Utc::now();
        let product = Product {
            id: state.next_product_id,
            title: product.title,
            price: product.price,
            description: product.description,
            category_id: product.category_id,
            images: product.images,
            created_at: now,
            updated_at: now,
        };
        state.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>> {
        Ok(self.state.read().await.products.get(&id).cloned())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Product>> {
        let state = self.state.read().await;
        Ok(state.products.values().find(|p| p.title == title).cloned())
    }

    async fn find_with_relations(&self, id: i32) -> Result<Option<ProductDetail>> {
        let state = self.state.read().await;
        Ok(state.products.get(&id).map(|p| state.detail(p)))
    }

    async fn find_all_with_relations(&self) -> Result<Vec<ProductDetail>> {
        let state = self.state.read().await;
        Ok(state.products.values().map(|p| state.detail(p)).collect())
    }

    async fn find_all_newest_first(&self) -> Result<Vec<Product>> {
        let state = self.state.read().await;
        Ok(state.products.values().rev().cloned().collect())
    }

    async fn save(&self, mut product: Product) -> Result<Product> {
        let mut state = self.state.write().await;
        let Some(stored) = state.products.get_mut(&product.id) else {
            return Err(CatalogError::ProductNotFound(product.id));
        };
        product.created_at = stored.created_at;
        product.updated_at = Utc::now();
        *stored = product.clone();
        Ok(product)
    }

    async fn delete(&self, id: i32) -> Result<u64> {
        let mut state = self.state.write().await;
        if state.products.remove(&id).is_none() {
            return Ok(0);
        }
        state.attributes.retain(|&(product_id, _), _| product_id != id);
        Ok(1)
    }
}

#[async_trait]
impl AttributeValueStore for InMemoryCatalog {
    async fn find(&self, product_id: i32, attribute_id: i32) -> Result<Option<ProductAttribute>> {
        let state = self.state.read().await;
        Ok(state.attributes.get(&(product_id, attribute_id)).cloned())
    }

    async fn upsert(&self, row: ProductAttribute) -> Result<ProductAttribute> {
        let mut state = self.state.write().await;
        state
            .attributes
            .insert((row.product_id, row.attribute_id), row.clone());
        Ok(row)
    }
}

#[async_trait]
impl CategoryLookup for InMemoryCatalog {
    async fn find_by_id(&self, id: i32) -> Result<Category> {
        let state = self.state.read().await;
        state
            .categories
            .get(&id)
            .cloned()
            .ok_or(CatalogError::CategoryNotFound(id))
    }
}
