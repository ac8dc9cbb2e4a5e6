use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenClaims;
use auth::TokenIssuer;
use auth::TokenPurpose;
use chrono::Duration;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AuthSession;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::PublicUser;
use crate::domain::auth::models::RefreshToken;
use crate::domain::auth::models::RefreshTokenId;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::TokenPair;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::Clock;
use crate::domain::auth::ports::RefreshTokenRepository;
use crate::domain::auth::ports::UserRepository;

/// Refresh tokens live this long; each rotation issues a fresh one.
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 90;

/// Authentication orchestrator.
///
/// Drives the register, login, refresh, and logout flows over the user and
/// refresh-token stores. Stateless per request; concurrent invocations are
/// isolated by the backing store.
pub struct AuthService<UR, RR, C>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
    C: Clock,
{
    users: Arc<UR>,
    refresh_tokens: Arc<RR>,
    clock: C,
    password_hasher: PasswordHasher,
    token_issuer: Arc<TokenIssuer>,
    access_token_ttl: Duration,
}

impl<UR, RR, C> AuthService<UR, RR, C>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
    C: Clock,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `users` - User persistence implementation
    /// * `refresh_tokens` - Refresh-token persistence implementation
    /// * `clock` - Source of "now" for expiry comparison
    /// * `token_issuer` - Shared-secret token signer
    /// * `access_token_ttl` - Short TTL for access tokens
    pub fn new(
        users: Arc<UR>,
        refresh_tokens: Arc<RR>,
        clock: C,
        token_issuer: Arc<TokenIssuer>,
        access_token_ttl: Duration,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
            clock,
            password_hasher: PasswordHasher::new(),
            token_issuer,
            access_token_ttl,
        }
    }

    /// Issue one access/refresh pair from a single claims skeleton and
    /// persist the hashed refresh token.
    ///
    /// The refresh-token plaintext is returned to the caller exactly once;
    /// only its hash reaches storage.
    async fn issue_token_pair(&self, user: &User) -> Result<TokenPair, AuthError> {
        let access_claims = TokenClaims::new(
            user.id,
            user.email.as_str(),
            user.username.as_str(),
            TokenPurpose::Access,
            self.access_token_ttl,
        );
        let refresh_ttl = Duration::days(REFRESH_TOKEN_TTL_DAYS);
        let refresh_claims = TokenClaims::new(
            user.id,
            user.email.as_str(),
            user.username.as_str(),
            TokenPurpose::Refresh,
            refresh_ttl,
        );

        let access_token = self
            .token_issuer
            .issue(&access_claims)
            .map_err(|e| AuthError::Unknown(format!("Token issuance failed: {}", e)))?;
        let refresh_token = self
            .token_issuer
            .issue(&refresh_claims)
            .map_err(|e| AuthError::Unknown(format!("Token issuance failed: {}", e)))?;

        let token_hash = self
            .password_hasher
            .hash(&refresh_token)
            .map_err(|e| AuthError::Unknown(format!("Token hashing failed: {}", e)))?;

        let now = self.clock.now();
        self.refresh_tokens
            .create(RefreshToken {
                id: RefreshTokenId::new(),
                user_id: user.id,
                token_hash,
                expires_at: now + refresh_ttl,
                created_at: now,
            })
            .await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    async fn session_for(&self, user: &User) -> Result<AuthSession, AuthError> {
        let tokens = self.issue_token_pair(user).await?;
        Ok(AuthSession {
            user: PublicUser::from(user),
            tokens,
        })
    }
}

#[async_trait]
impl<UR, RR, C> AuthServicePort for AuthService<UR, RR, C>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
    C: Clock,
{
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, AuthError> {
        // Uniqueness checks run before any record is created
        if self
            .users
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(AuthError::EmailAlreadyExists(command.email.to_string()));
        }

        if self
            .users
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(AuthError::UsernameAlreadyExists(
                command.username.to_string(),
            ));
        }

        let password_hash = self
            .password_hasher
            .hash(&command.password)
            .map_err(|e| AuthError::Unknown(format!("Password hashing failed: {}", e)))?;

        let now = self.clock.now();
        let user = self
            .users
            .create(User {
                id: UserId::new(),
                username: command.username,
                email: command.email,
                password_hash,
                created_at: now,
                updated_at: now,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");

        self.session_for(&user).await
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AuthError> {
        let user = self
            .users
            .find_by_email(command.email.as_str())
            .await?
            .ok_or_else(|| AuthError::UserNotFound(command.email.to_string()))?;

        let matches = self
            .password_hasher
            .verify(&command.password, &user.password_hash)
            .map_err(|e| AuthError::Unknown(format!("Password verification failed: {}", e)))?;

        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        self.session_for(&user).await
    }

    async fn refresh(&self, presented_token: &str) -> Result<AuthSession, AuthError> {
        // Cheap non-verifying decode to read the purpose claim; the
        // authoritative check is the hash scan against the store below.
        let claims = self
            .token_issuer
            .decode_unverified(presented_token)
            .map_err(|_| AuthError::InvalidRefreshToken)?;

        if claims.purpose != TokenPurpose::Refresh {
            return Err(AuthError::InvalidRefreshToken);
        }

        let user_id =
            UserId::from_string(&claims.sub).map_err(|_| AuthError::InvalidRefreshToken)?;

        let user = self
            .users
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound(user_id.to_string()))?;

        // O(active sessions per user) hash scan; expired records are already
        // excluded by the repository
        let candidates = self
            .refresh_tokens
            .find_valid_for_user(&user_id, self.clock.now())
            .await?;

        let matched = candidates
            .iter()
            .find(|candidate| {
                self.password_hasher
                    .verify(presented_token, &candidate.token_hash)
                    .unwrap_or(false)
            })
            .ok_or(AuthError::RefreshTokenNotFound)?;

        // Rotation: the presented token is single-use
        self.refresh_tokens.revoke(&matched.id).await?;

        self.session_for(&user).await
    }

    async fn logout(&self, user_id: &UserId) -> Result<(), AuthError> {
        self.refresh_tokens.revoke_all_for_user(user_id).await?;

        tracing::info!(user_id = %user_id, "All sessions revoked");

        Ok(())
    }
}
