use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted catalog product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i32,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category_id: i32,
    /// Stored image paths, already carrying the upload prefix.
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The value one product carries for one attribute definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAttribute {
    pub product_id: i32,
    pub attribute_id: i32,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
}

/// A product with its related records eagerly loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductDetail {
    pub product: Product,
    /// `None` only if the category row disappeared after the product was written.
    pub category: Option<Category>,
    /// Ordered by attribute id.
    pub attributes: Vec<ProductAttribute>,
}

/// A client-supplied `(attribute_id, value)` pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AttributeAssignment {
    /// Attribute definition ID. `id` is accepted as an alias.
    #[serde(alias = "id")]
    #[schema(example = 3)]
    pub attribute_id: i32,
    #[schema(example = "XL")]
    pub value: String,
}

impl AttributeAssignment {
    pub fn new(attribute_id: i32, value: impl Into<String>) -> Self {
        Self {
            attribute_id,
            value: value.into(),
        }
    }
}

/// Input of `ProductService::create`.
#[derive(Clone, Debug, PartialEq)]
pub struct CreateProduct {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category_id: i32,
    /// Bare filenames as returned by the upload endpoint.
    pub images: Vec<String>,
    pub attributes: Vec<AttributeAssignment>,
}

/// Input of `ProductService::update`. Absent fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateProduct {
    pub title: Option<String>,
    pub price: Option<f64>,
    pub category_id: Option<i32>,
    pub description: Option<String>,
    /// Accepted for shape compatibility with create; never applied.
    pub images: Option<Vec<String>>,
    pub attributes: Vec<AttributeAssignment>,
}

/// Row handed to `ProductStore::insert`.
#[derive(Clone, Debug, PartialEq)]
pub struct NewProduct {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category_id: i32,
    pub images: Vec<String>,
}

/// Descriptor of a file received by the upload endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub size: u64,
}

impl UploadedFile {
    pub fn named(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            size: 0,
        }
    }
}
