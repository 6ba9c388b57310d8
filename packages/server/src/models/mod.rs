pub mod attribute;
pub mod category;
pub mod product;
pub mod shared;
