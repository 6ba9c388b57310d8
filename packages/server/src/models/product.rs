use catalog_common::{
    AttributeAssignment, CreateProduct, Product, ProductAttribute, ProductDetail, UpdateProduct,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::CategoryResponse;
use super::shared::{validate_price, validate_title};
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateProductRequest {
    /// Must not match the title of any existing product.
    #[schema(example = "Linen Shirt")]
    pub title: String,
    #[schema(example = 49.9)]
    pub price: f64,
    #[schema(example = "Breathable summer shirt")]
    pub description: String,
    #[schema(example = 1)]
    pub category_id: i32,
    /// Filenames previously returned by the image upload endpoint.
    #[serde(default)]
    #[schema(example = json!(["1718030000-shirt.png"]))]
    pub images: Vec<String>,
    #[serde(default)]
    pub attributes: Vec<AttributeAssignment>,
}

/// PATCH body: absent fields are left unchanged.
#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct UpdateProductRequest {
    pub title: Option<String>,
    pub price: Option<f64>,
    pub category_id: Option<i32>,
    pub description: Option<String>,
    /// Accepted but not applied; images are only set at creation.
    pub images: Option<Vec<String>>,
    /// Merged into the stored values; attributes not listed are kept.
    #[serde(default)]
    pub attributes: Vec<AttributeAssignment>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category_id: i32,
    #[schema(example = json!(["/uploads/1718030000-shirt.png"]))]
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AttributeValueResponse {
    pub attribute_id: i32,
    pub value: String,
}

/// A product with its category and attribute values.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ProductDetailResponse {
    #[serde(flatten)]
    pub product: ProductResponse,
    pub category: Option<CategoryResponse>,
    pub attributes: Vec<AttributeValueResponse>,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            title: p.title,
            price: p.price,
            description: p.description,
            category_id: p.category_id,
            images: p.images,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

impl From<ProductAttribute> for AttributeValueResponse {
    fn from(a: ProductAttribute) -> Self {
        Self {
            attribute_id: a.attribute_id,
            value: a.value,
        }
    }
}

impl From<ProductDetail> for ProductDetailResponse {
    fn from(d: ProductDetail) -> Self {
        Self {
            product: d.product.into(),
            category: d.category.map(Into::into),
            attributes: d.attributes.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<CreateProductRequest> for CreateProduct {
    fn from(req: CreateProductRequest) -> Self {
        Self {
            title: req.title.trim().to_string(),
            price: req.price,
            description: req.description,
            category_id: req.category_id,
            images: req.images,
            attributes: req.attributes,
        }
    }
}

impl From<UpdateProductRequest> for UpdateProduct {
    fn from(req: UpdateProductRequest) -> Self {
        Self {
            title: req.title.map(|t| t.trim().to_string()),
            price: req.price,
            category_id: req.category_id,
            description: req.description,
            images: req.images,
            attributes: req.attributes,
        }
    }
}

pub fn validate_create_product(req: &CreateProductRequest) -> Result<(), AppError> {
    validate_title(&req.title)?;
    validate_price(req.price)
}

pub fn validate_update_product(req: &UpdateProductRequest) -> Result<(), AppError> {
    if let Some(ref title) = req.title {
        validate_title(title)?;
    }
    if let Some(price) = req.price {
        validate_price(price)?;
    }
    Ok(())
}
