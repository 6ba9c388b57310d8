pub mod error;
pub mod product;
pub mod reconcile;
pub mod service;
pub mod store;

pub use error::CatalogError;
pub use product::{
    AttributeAssignment, Category, CreateProduct, NewProduct, Product, ProductAttribute,
    ProductDetail, UpdateProduct, UploadedFile,
};
pub use service::ProductService;
