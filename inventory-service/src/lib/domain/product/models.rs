use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::category::models::CategoryId;
use crate::domain::file::models::FileId;
use crate::domain::file::models::UploadCommand;
use crate::domain::pagination::Pagination;
use crate::domain::product::errors::ProductIdError;

/// Product unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProductId(pub Uuid);

impl ProductId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, ProductIdError> {
        Uuid::parse_str(s)
            .map(ProductId)
            .map_err(|e| ProductIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Product entity.
///
/// Always references an existing category and the stored image file.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub category_id: CategoryId,
    pub image_file_id: FileId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Command to create a new product; the image upload is mandatory.
#[derive(Debug)]
pub struct CreateProductCommand {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub category_id: CategoryId,
    pub image: Option<UploadCommand>,
}

/// Command to partially update a product; a new image replaces the old one.
#[derive(Debug, Default)]
pub struct UpdateProductCommand {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
    pub category_id: Option<CategoryId>,
    pub image: Option<UploadCommand>,
}

/// Listing filter: category and price bounds, plus pagination.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category_id: Option<CategoryId>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub pagination: Pagination,
}
