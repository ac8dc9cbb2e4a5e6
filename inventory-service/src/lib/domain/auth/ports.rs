use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AuthSession;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::RefreshToken;
use crate::domain::auth::models::RefreshTokenId;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::models::Username;

/// Port for authentication orchestration.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account and issue a token pair.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Storage operation failed
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, AuthError>;

    /// Verify credentials and issue a token pair.
    ///
    /// # Errors
    /// * `UserNotFound` - No account for this email
    /// * `InvalidCredentials` - Password verification failed
    /// * `DatabaseError` - Storage operation failed
    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AuthError>;

    /// Rotate a refresh token: revoke the presented one, issue a new pair.
    ///
    /// # Errors
    /// * `InvalidRefreshToken` - Token is malformed or carries the wrong purpose
    /// * `UserNotFound` - Token subject no longer exists
    /// * `RefreshTokenNotFound` - No valid stored token matches (expired or
    ///   already rotated)
    /// * `DatabaseError` - Storage operation failed
    async fn refresh(&self, presented_token: &str) -> Result<AuthSession, AuthError>;

    /// Revoke every refresh token for the user (log out everywhere).
    ///
    /// # Errors
    /// * `DatabaseError` - Storage operation failed
    async fn logout(&self, user_id: &UserId) -> Result<(), AuthError>;
}

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` / `UsernameAlreadyExists` - Uniqueness violation
    /// * `DatabaseError` - Storage operation failed
    async fn create(&self, user: User) -> Result<User, AuthError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError>;

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AuthError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;
}

/// Persistence operations for refresh tokens.
///
/// Only hashed token secrets ever reach this port.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, AuthError>;

    /// All non-expired tokens for a user as of `now`.
    async fn find_valid_for_user(
        &self,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> Result<Vec<RefreshToken>, AuthError>;

    /// Revoke one token by id (used during rotation).
    async fn revoke(&self, id: &RefreshTokenId) -> Result<(), AuthError>;

    /// Revoke every token owned by the user (used on logout).
    async fn revoke_all_for_user(&self, user_id: &UserId) -> Result<(), AuthError>;
}

/// Source of "now" for expiry comparison, injected for testability.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation used outside of tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
