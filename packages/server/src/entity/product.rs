use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Unique by application check only; there is no storage constraint.
    pub title: String,
    pub price: f64,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// JSON array of image paths, each already carrying the upload prefix.
    #[sea_orm(column_type = "JsonBinary")]
    pub images: serde_json::Value,

    pub category_id: i32,
    #[sea_orm(belongs_to, from = "category_id", to = "id")]
    pub category: HasOne<super::category::Entity>,

    #[sea_orm(has_many, via = "product_attribute")]
    pub attributes: HasMany<super::attribute::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
