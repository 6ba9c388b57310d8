use async_trait::async_trait;
use catalog_common::error::Result;
use catalog_common::store::CategoryLookup;
use catalog_common::{CatalogError, Category};
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::entity::category;

impl From<category::Model> for Category {
    fn from(m: category::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
        }
    }
}

pub struct SeaCategoryLookup {
    db: DatabaseConnection,
}

impl SeaCategoryLookup {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryLookup for SeaCategoryLookup {
    async fn find_by_id(&self, id: i32) -> Result<Category> {
        category::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Category::from)
            .ok_or(CatalogError::CategoryNotFound(id))
    }
}
