use thiserror::Error;

/// Errors surfaced by the catalog service and its stores.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A product with this title already exists. Raised by create only.
    #[error("Product title '{0}' is already in use")]
    DuplicateTitle(String),

    #[error("Category {0} not found")]
    CategoryNotFound(i32),

    /// Raised by update only; reads and deletes treat a missing id as empty.
    #[error("Product {0} not found")]
    ProductNotFound(i32),

    /// Any failure of the underlying persistence layer.
    #[error("Store error: {0}")]
    Store(String),
}

#[cfg(feature = "sea-orm")]
impl From<sea_orm::DbErr> for CatalogError {
    fn from(err: sea_orm::DbErr) -> Self {
        CatalogError::Store(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
