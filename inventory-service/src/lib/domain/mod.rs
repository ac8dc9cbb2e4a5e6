pub mod auth;
pub mod category;
pub mod file;
pub mod pagination;
pub mod product;
