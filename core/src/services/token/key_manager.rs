//! Signing key management for JWT signing and verification
//!
//! Keys are loaded once, at construction, and cached for the lifetime of the
//! manager. Supported families:
//! - HMAC (HS256/384/512) from a shared secret
//! - RSA (RS256/384/512, PS256/384/512) from PEM files or strings
//! - ECDSA (ES256/384) from PKCS#8 PEM files or strings

use std::fs;
use std::path::{Path, PathBuf};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};
use sha2::{Digest, Sha256};

use crate::domain::entities::key_record::KeySnapshot;
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Key family an algorithm belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFamily {
    Hmac,
    Rsa,
    Ec,
}

impl KeyFamily {
    /// Classifies an algorithm, rejecting the ones this manager cannot load
    pub fn of(algorithm: Algorithm) -> Result<Self, DomainError> {
        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(KeyFamily::Hmac),
            Algorithm::RS256
            | Algorithm::RS384
            | Algorithm::RS512
            | Algorithm::PS256
            | Algorithm::PS384
            | Algorithm::PS512 => Ok(KeyFamily::Rsa),
            Algorithm::ES256 | Algorithm::ES384 => Ok(KeyFamily::Ec),
            other => Err(key_error(format!("Unsupported JWT algorithm: {:?}", other))),
        }
    }
}

/// Manager for the keys used in JWT operations
#[derive(Clone)]
pub struct KeyManager {
    algorithm: Algorithm,
    /// Key for signing JWTs
    encoding_key: EncodingKey,
    /// Key for verifying JWTs
    decoding_key: DecodingKey,
    /// Public key snapshot, asymmetric algorithms only
    snapshot: Option<KeySnapshot>,
    /// Paths the keys were read from, if any
    key_paths: Option<(PathBuf, PathBuf)>,
}

impl std::fmt::Debug for KeyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyManager")
            .field("algorithm", &self.algorithm)
            .field("key_id", &self.key_id())
            .field("key_paths", &self.key_paths)
            .finish()
    }
}

impl KeyManager {
    /// Loads the keys described by a codec configuration
    ///
    /// HMAC algorithms use `jwt_secret`; asymmetric algorithms require both
    /// key paths.
    ///
    /// # Returns
    ///
    /// * `Ok(KeyManager)` - Keys loaded and cached
    /// * `Err(DomainError)` - `TokenError::KeyLoadError` describing the problem
    pub fn from_config(config: &TokenServiceConfig) -> Result<Self, DomainError> {
        match KeyFamily::of(config.algorithm)? {
            KeyFamily::Hmac => Self::from_secret(config.algorithm, &config.jwt_secret),
            KeyFamily::Rsa | KeyFamily::Ec => {
                let private_key_path = config.private_key_path.as_deref().ok_or_else(|| {
                    key_error(format!("{:?} requires a private key path", config.algorithm))
                })?;
                let public_key_path = config.public_key_path.as_deref().ok_or_else(|| {
                    key_error(format!("{:?} requires a public key path", config.algorithm))
                })?;

                Self::new(config.algorithm, private_key_path, public_key_path)
            }
        }
    }

    /// Creates an HMAC key manager from a shared secret
    pub fn from_secret(algorithm: Algorithm, secret: &str) -> Result<Self, DomainError> {
        if KeyFamily::of(algorithm)? != KeyFamily::Hmac {
            return Err(key_error(format!("{:?} is not an HMAC algorithm", algorithm)));
        }
        if secret.is_empty() {
            return Err(key_error("JWT secret must not be empty".to_string()));
        }

        Ok(Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            snapshot: None,
            key_paths: None,
        })
    }

    /// Creates an asymmetric key manager from key file paths
    ///
    /// # Arguments
    ///
    /// * `algorithm` - An RSA or ECDSA algorithm
    /// * `private_key_path` - Path to the PEM-encoded private key file
    /// * `public_key_path` - Path to the PEM-encoded public key file
    pub fn new<P: AsRef<Path>>(
        algorithm: Algorithm,
        private_key_path: P,
        public_key_path: P,
    ) -> Result<Self, DomainError> {
        let private_key_path = private_key_path.as_ref().to_path_buf();
        let public_key_path = public_key_path.as_ref().to_path_buf();

        let private_key_pem = fs::read_to_string(&private_key_path)
            .map_err(|e| key_error(format!("Failed to read private key: {}", e)))?;
        let public_key_pem = fs::read_to_string(&public_key_path)
            .map_err(|e| key_error(format!("Failed to read public key: {}", e)))?;

        let mut manager = Self::from_pem_strings(algorithm, &private_key_pem, &public_key_pem)?;
        manager.key_paths = Some((private_key_path, public_key_path));
        Ok(manager)
    }

    /// Creates an asymmetric key manager from PEM strings (useful for testing or embedded keys)
    pub fn from_pem_strings(
        algorithm: Algorithm,
        private_key_pem: &str,
        public_key_pem: &str,
    ) -> Result<Self, DomainError> {
        let (encoding_key, decoding_key) = match KeyFamily::of(algorithm)? {
            KeyFamily::Rsa => (
                EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
                    .map_err(|e| key_error(format!("Invalid private key format: {}", e)))?,
                DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
                    .map_err(|e| key_error(format!("Invalid public key format: {}", e)))?,
            ),
            KeyFamily::Ec => (
                EncodingKey::from_ec_pem(private_key_pem.as_bytes())
                    .map_err(|e| key_error(format!("Invalid private key format: {}", e)))?,
                DecodingKey::from_ec_pem(public_key_pem.as_bytes())
                    .map_err(|e| key_error(format!("Invalid public key format: {}", e)))?,
            ),
            KeyFamily::Hmac => {
                return Err(key_error(format!("{:?} does not use key pairs", algorithm)));
            }
        };

        let public_key_pem = public_key_pem.trim().to_string();
        let snapshot = KeySnapshot {
            key_id: key_id(&public_key_pem),
            algorithm: format!("{:?}", algorithm),
            public_key_pem,
        };

        Ok(Self {
            algorithm,
            encoding_key,
            decoding_key,
            snapshot: Some(snapshot),
            key_paths: None,
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Returns the encoding key for signing JWTs
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// Returns the decoding key for verifying JWTs
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    /// Public key snapshot recorded alongside sessions; `None` for HMAC
    pub fn snapshot(&self) -> Option<&KeySnapshot> {
        self.snapshot.as_ref()
    }

    /// Fingerprint of the public key; `None` for HMAC
    pub fn key_id(&self) -> Option<&str> {
        self.snapshot.as_ref().map(|s| s.key_id.as_str())
    }

    /// Returns the paths to the key files, when loaded from disk
    pub fn key_paths(&self) -> Option<(&Path, &Path)> {
        self.key_paths
            .as_ref()
            .map(|(private, public)| (private.as_path(), public.as_path()))
    }
}

/// First 16 hex characters of the SHA-256 of the public key PEM
fn key_id(public_key_pem: &str) -> String {
    let digest = Sha256::digest(public_key_pem.as_bytes());
    hex::encode(digest)[..16].to_string()
}

fn key_error(message: String) -> DomainError {
    DomainError::Token(TokenError::KeyLoadError { message })
}
