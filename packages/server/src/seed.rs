use sea_orm::sea_query::{Index, PostgresQueryBuilder};
use sea_orm::*;
use tracing::{info, warn};

use crate::entity::product;

/// Ensure required database indexes exist.
///
/// `product.title` gets a plain (non-unique) index: uniqueness is checked by
/// the service on create only, so duplicate titles reachable through updates
/// must still be storable.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    let indexes = [
        Index::create()
            .if_not_exists()
            .name("idx_product_title")
            .table(product::Entity)
            .col(product::Column::Title)
            .to_string(PostgresQueryBuilder),
        Index::create()
            .if_not_exists()
            .name("idx_product_category")
            .table(product::Entity)
            .col(product::Column::CategoryId)
            .to_string(PostgresQueryBuilder),
    ];

    for stmt in indexes {
        match db.execute_unprepared(&stmt).await {
            Ok(_) => info!("Ensured index: {stmt}"),
            Err(e) => warn!("Failed to create index ({stmt}): {e}"),
        }
    }

    Ok(())
}
