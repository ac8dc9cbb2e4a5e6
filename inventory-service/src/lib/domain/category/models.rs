use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::category::errors::CategoryIdError;
use crate::domain::pagination::Pagination;

/// Category unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CategoryId(pub Uuid);

impl CategoryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, CategoryIdError> {
        Uuid::parse_str(s)
            .map(CategoryId)
            .map_err(|e| CategoryIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for CategoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Product category entity.
///
/// The slug is derived from the name and regenerated whenever the name
/// changes.
#[derive(Debug, Clone)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Command to create a new category
#[derive(Debug)]
pub struct CreateCategoryCommand {
    pub name: String,
    pub description: Option<String>,
}

/// Command to partially update a category
#[derive(Debug, Default)]
pub struct UpdateCategoryCommand {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Listing filter: substring match on slug and/or name, plus pagination.
#[derive(Debug, Clone, Default)]
pub struct CategoryFilter {
    pub slug: Option<String>,
    pub name: Option<String>,
    pub pagination: Pagination,
}

/// Derive a URL-safe slug from a category name.
///
/// Lowercases, keeps alphanumeric runs, and joins them with hyphens:
/// "Home & Garden" becomes "home-garden".
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
