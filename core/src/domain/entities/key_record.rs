//! Per-identity key record: the live refresh token and its redemption history.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of redeemed refresh token fingerprints kept per identity
pub const REDEEMED_TOKENS_CAPACITY: usize = 10;

/// Outcome of a compare-and-swap rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationOutcome {
    /// The expected token was current and has been replaced
    Rotated,
    /// The expected token was not current; nothing changed
    Conflict,
}

/// Public half of the signing key active when a session was issued
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySnapshot {
    /// Short fingerprint of the public key
    pub key_id: String,
    /// JWT algorithm name, e.g. "RS256"
    pub algorithm: String,
    /// PEM-encoded public key
    pub public_key_pem: String,
}

/// Fixed-capacity FIFO of redeemed token fingerprints, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RedeemedTokens(VecDeque<String>);

impl RedeemedTokens {
    pub fn new() -> Self {
        Self(VecDeque::with_capacity(REDEEMED_TOKENS_CAPACITY))
    }

    /// Builds the history from stored entries, keeping only the newest ones
    pub fn from_vec(entries: Vec<String>) -> Self {
        let mut tokens = Self::new();
        for entry in entries {
            tokens.push(entry);
        }
        tokens
    }

    /// Appends a fingerprint, evicting the oldest past capacity
    pub fn push(&mut self, digest: String) {
        if self.0.len() == REDEEMED_TOKENS_CAPACITY {
            self.0.pop_front();
        }
        self.0.push_back(digest);
    }

    pub fn contains(&self, digest: &str) -> bool {
        self.0.iter().any(|d| d == digest)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

/// Key record owned by the token lifecycle, one per identity
///
/// Refresh tokens are held as SHA-256 fingerprints. The current token
/// never appears in the redeemed history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRecord {
    pub user_id: Uuid,

    /// Fingerprint of the most recently issued, unredeemed refresh token
    pub current_refresh_token: String,

    /// Fingerprints of refresh tokens already exchanged, most recent last
    pub redeemed_tokens: RedeemedTokens,

    /// Signing key active at issuance, asymmetric algorithms only
    pub signing_key: Option<KeySnapshot>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl KeyRecord {
    /// Creates a fresh record for a newly issued session
    pub fn new(user_id: Uuid, token_digest: String, signing_key: Option<KeySnapshot>) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            current_refresh_token: token_digest,
            redeemed_tokens: RedeemedTokens::new(),
            signing_key,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the current token after a new login. History is left alone.
    pub fn reissue(&mut self, token_digest: String, signing_key: Option<KeySnapshot>) {
        self.current_refresh_token = token_digest;
        self.signing_key = signing_key;
        self.updated_at = Utc::now();
    }

    /// Compare-and-swap of the current token
    ///
    /// Only succeeds when `expected` is the current token; the old token moves
    /// into the redeemed history. On `Conflict` the record is untouched.
    pub fn rotate(&mut self, expected: &str, replacement: String) -> RotationOutcome {
        if self.current_refresh_token != expected {
            return RotationOutcome::Conflict;
        }

        let previous = std::mem::replace(&mut self.current_refresh_token, replacement);
        self.redeemed_tokens.push(previous);
        self.updated_at = Utc::now();
        RotationOutcome::Rotated
    }

    pub fn has_redeemed(&self, token_digest: &str) -> bool {
        self.redeemed_tokens.contains(token_digest)
    }

    pub fn is_current(&self, token_digest: &str) -> bool {
        self.current_refresh_token == token_digest
    }
}
