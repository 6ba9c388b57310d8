//! SeaORM-backed implementations of the catalog store traits.

mod attribute;
mod category;
mod product;

pub use attribute::SeaAttributeValueStore;
pub use category::SeaCategoryLookup;
pub use product::SeaProductStore;
