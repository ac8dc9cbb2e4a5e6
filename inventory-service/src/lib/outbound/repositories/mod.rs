pub mod category;
pub mod file;
pub mod product;
pub mod refresh_token;
pub mod user;
