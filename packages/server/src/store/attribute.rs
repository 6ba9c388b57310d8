use async_trait::async_trait;
use catalog_common::ProductAttribute;
use catalog_common::error::Result;
use catalog_common::store::AttributeValueStore;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, Set};

use crate::entity::product_attribute;

impl From<product_attribute::Model> for ProductAttribute {
    fn from(m: product_attribute::Model) -> Self {
        Self {
            product_id: m.product_id,
            attribute_id: m.attribute_id,
            value: m.value,
        }
    }
}

/// Attribute values keyed by the `(product_id, attribute_id)` primary key.
///
/// `upsert` is a single `INSERT ... ON CONFLICT DO UPDATE`, so concurrent
/// writers to the same pair cannot create a second row.
pub struct SeaAttributeValueStore {
    db: DatabaseConnection,
}

impl SeaAttributeValueStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AttributeValueStore for SeaAttributeValueStore {
    async fn find(&self, product_id: i32, attribute_id: i32) -> Result<Option<ProductAttribute>> {
        Ok(product_attribute::Entity::find_by_id((product_id, attribute_id))
            .one(&self.db)
            .await?
            .map(ProductAttribute::from))
    }

    async fn upsert(&self, row: ProductAttribute) -> Result<ProductAttribute> {
        let model = product_attribute::ActiveModel {
            product_id: Set(row.product_id),
            attribute_id: Set(row.attribute_id),
            value: Set(row.value.clone()),
        };

        product_attribute::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    product_attribute::Column::ProductId,
                    product_attribute::Column::AttributeId,
                ])
                .update_column(product_attribute::Column::Value)
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(row)
    }
}
