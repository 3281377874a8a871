//! Token lifecycle: login, refresh rotation with reuse detection, logout

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::key_record::RotationOutcome;
use crate::domain::entities::token::{
    fingerprint, fingerprint_prefix, AuthenticatedUser, TokenType,
};
use crate::domain::entities::user::{Role, User};
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::{KeyRecordRepository, UserRepository};
use crate::services::password::{validate_password_strength, BcryptPasswordHasher, PasswordHasher};
use crate::services::token::TokenCodec;

/// Authentication service owning the token lifecycle
///
/// Holds no mutable state of its own. Every rotation decision is delegated to
/// the key record store's compare-and-swap, so the service can be shared across
/// workers behind an `Arc`.
pub struct AuthService<U, K, P = BcryptPasswordHasher>
where
    U: UserRepository,
    K: KeyRecordRepository,
    P: PasswordHasher,
{
    /// Identity directory
    user_repository: Arc<U>,
    /// Per-identity session state
    key_records: Arc<K>,
    /// Credential verifier
    password_hasher: Arc<P>,
    /// JWT encoder/decoder
    codec: Arc<TokenCodec>,
}

impl<U, K, P> AuthService<U, K, P>
where
    U: UserRepository,
    K: KeyRecordRepository,
    P: PasswordHasher,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Identity directory
    /// * `key_records` - Key record store
    /// * `password_hasher` - Credential verifier
    /// * `codec` - Token codec with its keys already loaded
    pub fn new(
        user_repository: Arc<U>,
        key_records: Arc<K>,
        password_hasher: Arc<P>,
        codec: Arc<TokenCodec>,
    ) -> Self {
        Self {
            user_repository,
            key_records,
            password_hasher,
            codec,
        }
    }

    pub fn codec(&self) -> &Arc<TokenCodec> {
        &self.codec
    }

    /// Authenticate with an identifier (user id or email) and a password
    ///
    /// Issues the first token pair of a session. Any refresh token issued by an
    /// earlier login stops being current.
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - New token pair and the user's role
    /// * `Err(AuthError::InvalidCredentials)` - Unknown identity or wrong password
    /// * `Err(DomainError::StoreUnavailable)` - Store failure
    pub async fn login(&self, identifier: &str, password: &str) -> DomainResult<AuthResponse> {
        let user = match self.user_repository.find_by_id_or_email(identifier).await? {
            Some(user) => user,
            None => {
                self.password_hasher.verify_absent(password).await;
                tracing::info!("Login rejected: unknown identity");
                return Err(DomainError::Auth(AuthError::InvalidCredentials));
            }
        };

        if !self.password_hasher.verify(password, &user.password_hash).await {
            tracing::info!(user_id = %user.id, "Login rejected: wrong password");
            return Err(DomainError::Auth(AuthError::InvalidCredentials));
        }

        let token_pair = self.codec.issue_pair(user.id, user.role)?;
        self.key_records
            .record_issued(
                user.id,
                &fingerprint(&token_pair.refresh_token),
                self.codec.key_snapshot(),
            )
            .await?;

        tracing::info!(user_id = %user.id, role = %user.role, "User logged in");

        Ok(AuthResponse::from_token_pair(token_pair, user.role))
    }

    /// Exchange a refresh token for a new pair, exactly once
    ///
    /// A token found in the redeemed history is treated as stolen: the whole
    /// key record is revoked. A token that loses the compare-and-swap (raced by
    /// a concurrent refresh, or superseded by a newer login) is rejected without
    /// revoking, and is never retried.
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - Rotated token pair
    /// * `Err(TokenError::*)` - Malformed, expired, wrong type, bad signature or no session
    /// * `Err(AuthError::SuspiciousActivity)` - Replayed or raced token
    /// * `Err(AuthError::UserNotFound)` - Identity deleted since login
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<AuthResponse> {
        let claims = self.codec.decode_expecting(refresh_token, TokenType::Refresh)?;
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::Malformed))?;
        let presented = fingerprint(refresh_token);

        let record = self
            .key_records
            .find_by_user_id(user_id)
            .await?
            .ok_or(DomainError::Token(TokenError::UnknownToken))?;

        if record.has_redeemed(&presented) {
            self.key_records.revoke(user_id).await?;
            tracing::warn!(
                user_id = %user_id,
                token = fingerprint_prefix(&presented),
                "Redeemed refresh token presented again; session revoked"
            );
            return Err(DomainError::Auth(AuthError::SuspiciousActivity));
        }

        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;

        let token_pair = self.codec.issue_pair(user.id, user.role)?;
        let replacement = fingerprint(&token_pair.refresh_token);

        match self
            .key_records
            .mark_redeemed_and_rotate(user_id, &presented, &replacement)
            .await?
        {
            RotationOutcome::Rotated => {
                tracing::info!(user_id = %user_id, "Refresh token rotated");
                Ok(AuthResponse::from_token_pair(token_pair, user.role))
            }
            RotationOutcome::Conflict => {
                tracing::warn!(
                    user_id = %user_id,
                    token = fingerprint_prefix(&presented),
                    "Refresh token rotation conflict"
                );
                Err(DomainError::Auth(AuthError::SuspiciousActivity))
            }
        }
    }

    /// Revoke the session of an identity
    ///
    /// Idempotent. A supplied refresh token that decodes to another subject is
    /// rejected; one that does not decode at all is ignored.
    pub async fn logout(&self, user_id: Uuid, refresh_token: Option<&str>) -> DomainResult<()> {
        if let Some(token) = refresh_token {
            if let Ok(claims) = self.codec.decode(token) {
                if claims.user_id().ok() != Some(user_id) {
                    tracing::warn!(user_id = %user_id, "Logout with a refresh token of another subject");
                    return Err(DomainError::Token(TokenError::UnknownToken));
                }
            }
        }

        let existed = self.key_records.revoke(user_id).await?;
        tracing::info!(user_id = %user_id, existed, "User logged out");

        Ok(())
    }

    /// Resolve a bearer access token; never touches the key record store
    pub fn authenticate(&self, bearer: &str) -> DomainResult<AuthenticatedUser> {
        self.codec.authenticate(bearer)
    }

    /// Create a new identity
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - Created identity
    /// * `Err(AuthError::WeakPassword)` - Password violates the policy
    /// * `Err(AuthError::UserAlreadyExists)` - Email already registered
    pub async fn register(&self, email: &str, password: &str, role: Role) -> DomainResult<User> {
        validate_password_strength(password)?;

        let password_hash = self.password_hasher.hash(password).await?;
        let user = self
            .user_repository
            .create(User::new(email, password_hash, role))
            .await?;

        tracing::info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(user)
    }

    /// Look up the identity behind an authenticated request
    pub async fn current_user(&self, user_id: Uuid) -> DomainResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))
    }

    /// Replace the password of an identity and end its session
    ///
    /// # Returns
    ///
    /// * `Ok(())` - New hash stored and key record revoked
    /// * `Err(AuthError::InvalidCredentials)` - Current password did not verify
    /// * `Err(AuthError::WeakPassword)` - New password violates the policy
    pub async fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let user = self.current_user(user_id).await?;

        if !self
            .password_hasher
            .verify(current_password, &user.password_hash)
            .await
        {
            return Err(DomainError::Auth(AuthError::InvalidCredentials));
        }
        validate_password_strength(new_password)?;

        let password_hash = self.password_hasher.hash(new_password).await?;
        self.user_repository
            .store_password_hash(user_id, &password_hash)
            .await?;
        self.key_records.revoke(user_id).await?;

        tracing::info!(user_id = %user_id, "Password changed; session revoked");
        Ok(())
    }
}
