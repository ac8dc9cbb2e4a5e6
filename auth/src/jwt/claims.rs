use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Distinguishes access tokens from refresh tokens.
///
/// Every issued token carries exactly one purpose. A token presented for the
/// wrong purpose is rejected before any store lookup, so an access token can
/// never be replayed as a refresh token and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenPurpose {
    Access,
    Refresh,
}

/// Claims embedded in every issued token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenClaims {
    /// Subject (user identifier)
    pub sub: String,

    /// Email of the subject
    pub email: String,

    /// Username of the subject
    pub username: String,

    /// Purpose tag (access or refresh)
    pub purpose: TokenPurpose,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Unique token identifier, so two tokens issued within the same second
    /// never serialize to the same string
    pub jti: String,
}

impl TokenClaims {
    /// Build claims for a user with an expiration derived from `ttl`.
    pub fn new(
        user_id: impl ToString,
        email: impl ToString,
        username: impl ToString,
        purpose: TokenPurpose,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            username: username.to_string(),
            purpose,
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }
}
