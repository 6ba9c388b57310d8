mod common;
mod product;
