//! Authentication primitives library
//!
//! Provides the cryptographic building blocks for the inventory service:
//! - Password hashing (Argon2id), also used to hash refresh-token secrets at rest
//! - Purpose-tagged JWT issuance and decoding (access vs refresh tokens)
//!
//! The service defines its own orchestration on top of these primitives; this
//! crate stays free of storage and HTTP concerns.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Token Issuance
//! ```
//! use auth::{TokenClaims, TokenIssuer, TokenPurpose};
//! use chrono::Duration;
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = TokenClaims::new(
//!     "user123",
//!     "alice@example.com",
//!     "alice",
//!     TokenPurpose::Access,
//!     Duration::minutes(15),
//! );
//! let token = issuer.issue(&claims).unwrap();
//! let decoded = issuer.decode(&token).unwrap();
//! assert_eq!(decoded.purpose, TokenPurpose::Access);
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::TokenClaims;
pub use jwt::TokenError;
pub use jwt::TokenIssuer;
pub use jwt::TokenPurpose;
pub use password::PasswordError;
pub use password::PasswordHasher;
