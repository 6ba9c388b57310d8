use std::sync::Arc;

use tracing::{info, instrument};

use crate::error::{CatalogError, Result};
use crate::product::{
    CreateProduct, NewProduct, Product, ProductDetail, UpdateProduct, UploadedFile,
};
use crate::reconcile::reconcile_attributes;
use crate::store::{AttributeValueStore, CategoryLookup, ProductStore};

/// Prefix prepended to image filenames when a product is created.
pub const DEFAULT_UPLOAD_PREFIX: &str = "/uploads/";

/// Product use cases on top of the injected stores.
///
/// Calls are not coordinated with each other: the title check in `create`
/// and the attribute loop run without locks or a surrounding transaction.
#[derive(Clone)]
pub struct ProductService {
    products: Arc<dyn ProductStore>,
    attributes: Arc<dyn AttributeValueStore>,
    categories: Arc<dyn CategoryLookup>,
    upload_prefix: String,
}

impl ProductService {
    pub fn new(
        products: Arc<dyn ProductStore>,
        attributes: Arc<dyn AttributeValueStore>,
        categories: Arc<dyn CategoryLookup>,
    ) -> Self {
        Self {
            products,
            attributes,
            categories,
            upload_prefix: DEFAULT_UPLOAD_PREFIX.to_string(),
        }
    }

    pub fn with_upload_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.upload_prefix = prefix.into();
        self
    }

    pub fn upload_prefix(&self) -> &str {
        &self.upload_prefix
    }

    /// Create a product and assign its attribute values.
    ///
    /// The returned product does not include the attribute rows.
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create(&self, input: CreateProduct) -> Result<Product> {
        if self.products.find_by_title(&input.title).await?.is_some() {
            return Err(CatalogError::DuplicateTitle(input.title));
        }

        let category = self.categories.find_by_id(input.category_id).await?;

        let images = input
            .images
            .iter()
            .map(|filename| format!("{}{}", self.upload_prefix, filename))
            .collect();

        let product = self
            .products
            .insert(NewProduct {
                title: input.title,
                price: input.price,
                description: input.description,
                category_id: category.id,
                images,
            })
            .await?;

        let outcome =
            reconcile_attributes(self.attributes.as_ref(), product.id, &input.attributes).await?;

        info!(
            product_id = product.id,
            attributes_created = outcome.created,
            attributes_updated = outcome.updated,
            "Product created"
        );
        Ok(product)
    }

    /// Patch the present scalar fields of a product and merge its attribute values.
    ///
    /// `input.images` is ignored. The title is not checked for uniqueness here.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: UpdateProduct) -> Result<Product> {
        let mut product = self
            .products
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))?;

        if let Some(title) = input.title {
            product.title = title;
        }
        if let Some(price) = input.price {
            product.price = price;
        }
        if let Some(category_id) = input.category_id {
            let category = self.categories.find_by_id(category_id).await?;
            product.category_id = category.id;
        }
        if let Some(description) = input.description {
            product.description = description;
        }

        let product = self.products.save(product).await?;

        let outcome =
            reconcile_attributes(self.attributes.as_ref(), product.id, &input.attributes).await?;

        info!(
            product_id = product.id,
            attributes_created = outcome.created,
            attributes_updated = outcome.updated,
            "Product updated"
        );
        Ok(product)
    }

    pub async fn find_one(&self, id: i32) -> Result<Option<ProductDetail>> {
        self.products.find_with_relations(id).await
    }

    pub async fn find_all(&self) -> Result<Vec<ProductDetail>> {
        self.products.find_all_with_relations().await
    }

    /// All products, most recently created first, without relations.
    pub async fn find_nes_tabs(&self) -> Result<Vec<Product>> {
        self.products.find_all_newest_first().await
    }

    /// Delete a product. A missing id is not an error.
    #[instrument(skip(self))]
    pub async fn destroy(&self, id: i32) -> Result<()> {
        let removed = self.products.delete(id).await?;
        if removed > 0 {
            info!(product_id = id, "Product deleted");
        }
        Ok(())
    }

    /// Names of the uploaded files, in upload order.
    pub fn upload_images(&self, files: Vec<UploadedFile>) -> Vec<String> {
        files.into_iter().map(|file| file.filename).collect()
    }
}
