//! Token codec: mints and verifies signed access and refresh tokens

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::key_record::KeySnapshot;
use crate::domain::entities::token::{AuthenticatedUser, Claims, TokenPair, TokenType};
use crate::domain::entities::user::Role;
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;
use super::key_manager::KeyManager;

/// Encodes and decodes JWTs under the configured algorithm
///
/// Stateless apart from the cached keys; decoding never touches storage.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    config: TokenServiceConfig,
    keys: KeyManager,
    validation: Validation,
}

impl TokenCodec {
    /// Creates a new codec, loading keys described by `config`
    ///
    /// # Returns
    ///
    /// A new `TokenCodec` or `TokenError::KeyLoadError` if key loading fails
    pub fn new(config: TokenServiceConfig) -> Result<Self, DomainError> {
        let keys = KeyManager::from_config(&config)?;
        Ok(Self::with_keys(config, keys))
    }

    /// Creates a codec around already loaded keys
    ///
    /// The algorithm of `keys` wins over the one in `config`.
    pub fn with_keys(mut config: TokenServiceConfig, keys: KeyManager) -> Self {
        config.algorithm = keys.algorithm();

        let mut validation = Validation::new(config.algorithm);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);

        Self {
            config,
            keys,
            validation,
        }
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Issues a token for `subject` that expires `ttl` from now
    pub fn issue(
        &self,
        subject: Uuid,
        token_type: TokenType,
        ttl: Duration,
    ) -> Result<String, DomainError> {
        let claims = Claims::new(
            subject,
            token_type,
            ttl,
            &self.config.issuer,
            &self.config.audience,
        )?;
        self.encode_claims(&claims)
    }

    /// Signs arbitrary claims
    pub fn encode_claims(&self, claims: &Claims) -> Result<String, DomainError> {
        let mut header = Header::new(self.keys.algorithm());
        header.kid = self.keys.key_id().map(str::to_string);

        encode(&header, claims, self.keys.encoding_key()).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign token");
            DomainError::Token(TokenError::TokenGenerationFailed)
        })
    }

    /// Mints an access + refresh pair; the access token carries the role
    pub fn issue_pair(&self, subject: Uuid, role: Role) -> Result<TokenPair, DomainError> {
        let access_claims = Claims::new(
            subject,
            TokenType::Access,
            self.config.access_token_ttl,
            &self.config.issuer,
            &self.config.audience,
        )?
        .with_role(role);

        let access_token = self.encode_claims(&access_claims)?;
        let refresh_token =
            self.issue(subject, TokenType::Refresh, self.config.refresh_token_ttl)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_in: self.config.access_token_ttl.num_seconds(),
            refresh_expires_in: self.config.refresh_token_ttl.num_seconds(),
        })
    }

    /// Verifies signature, issuer, audience and expiry
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Token is valid and `now < exp`
    /// * `Err(TokenError::Expired)` - Signature valid but expired
    /// * `Err(TokenError::InvalidSignature)` - Signed with another key or algorithm
    /// * `Err(TokenError::Malformed)` - Anything else
    pub fn decode(&self, token: &str) -> Result<Claims, DomainError> {
        let data = decode::<Claims>(token, self.keys.decoding_key(), &self.validation)
            .map_err(|e| {
                let err = match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    ErrorKind::InvalidSignature
                    | ErrorKind::InvalidAlgorithm
                    | ErrorKind::InvalidEcdsaKey
                    | ErrorKind::InvalidRsaKey(_) => TokenError::InvalidSignature,
                    _ => TokenError::Malformed,
                };
                DomainError::Token(err)
            })?;

        // jsonwebtoken accepts exp == now; a token is only valid strictly before exp
        if data.claims.exp <= Utc::now().timestamp() {
            return Err(DomainError::Token(TokenError::Expired));
        }

        data.claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::Malformed))?;

        Ok(data.claims)
    }

    /// Decodes and checks the type tag
    pub fn decode_expecting(
        &self,
        token: &str,
        expected: TokenType,
    ) -> Result<Claims, DomainError> {
        let claims = self.decode(token)?;
        if claims.token_type != expected {
            return Err(DomainError::Token(TokenError::WrongType {
                expected,
                actual: claims.token_type,
            }));
        }
        Ok(claims)
    }

    /// Resolves a bearer access token to the identity it was issued for
    pub fn authenticate(&self, bearer: &str) -> Result<AuthenticatedUser, DomainError> {
        let claims = self.decode_expecting(bearer, TokenType::Access)?;
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::Malformed))?;
        let role = claims
            .role
            .ok_or(DomainError::Token(TokenError::Malformed))?;

        Ok(AuthenticatedUser { user_id, role })
    }

    /// Public key material recorded with a new session, asymmetric signing only
    pub fn key_snapshot(&self) -> Option<KeySnapshot> {
        self.keys.snapshot().cloned()
    }
}
