//! Serializable message types for the HTTP layer.
//!
//! These types separate domain models from serialization concerns and are
//! shared across handlers.

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::auth::models::AuthSession;
use crate::domain::auth::models::PublicUser;
use crate::domain::category::models::Category;
use crate::domain::product::models::Product;

/// Client-facing user representation; never carries a password field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&PublicUser> for UserData {
    fn from(user: &PublicUser) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Token pair nested under `tokens` in session responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPairData {
    pub access_token: String,
    pub refresh_token: String,
}

/// Body of register, login, and refresh responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub user: UserData,
    pub tokens: TokenPairData,
}

impl From<&AuthSession> for SessionData {
    fn from(session: &AuthSession) -> Self {
        Self {
            user: (&session.user).into(),
            tokens: TokenPairData {
                access_token: session.tokens.access_token.clone(),
                refresh_token: session.tokens.refresh_token.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryData {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Category> for CategoryData {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name.clone(),
            slug: category.slug.clone(),
            description: category.description.clone(),
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductData {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: rust_decimal::Decimal,
    pub stock: i32,
    pub category_id: String,
    pub image_file_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Product> for ProductData {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            stock: product.stock,
            category_id: product.category_id.to_string(),
            image_file_id: product.image_file_id.to_string(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
