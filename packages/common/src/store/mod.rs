mod traits;

pub mod memory;

pub use traits::{AttributeValueStore, CategoryLookup, ProductStore};
