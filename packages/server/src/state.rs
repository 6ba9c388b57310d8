use std::sync::Arc;

use catalog_common::ProductService;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::store::{SeaAttributeValueStore, SeaCategoryLookup, SeaProductStore};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub products: ProductService,
    pub config: AppConfig,
}

impl AppState {
    /// Wire the product service to SeaORM-backed stores sharing `db`.
    pub fn new(db: DatabaseConnection, config: AppConfig) -> Self {
        let products = ProductService::new(
            Arc::new(SeaProductStore::new(db.clone())),
            Arc::new(SeaAttributeValueStore::new(db.clone())),
            Arc::new(SeaCategoryLookup::new(db.clone())),
        )
        .with_upload_prefix(config.upload.prefix.clone());

        Self {
            db,
            products,
            config,
        }
    }
}
