use thiserror::Error;

/// Error for CategoryId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CategoryIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for category operations
#[derive(Debug, Clone, Error)]
pub enum CategoryError {
    #[error("Invalid category ID: {0}")]
    InvalidCategoryId(#[from] CategoryIdError),

    #[error("Category name must be at least {min} characters")]
    NameTooShort { min: usize },

    #[error("Category not found: {0}")]
    NotFound(String),

    #[error("Category has linked products and cannot be deleted")]
    HasLinkedProducts,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
