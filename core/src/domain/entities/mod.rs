//! Domain entities representing core business objects.

pub mod key_record;
pub mod token;
pub mod user;


// Re-export commonly used types
pub use key_record::{
    KeyRecord, KeySnapshot, RedeemedTokens, RotationOutcome, REDEEMED_TOKENS_CAPACITY,
};
pub use token::{
    fingerprint, fingerprint_prefix, AuthenticatedUser, Claims, TokenPair, TokenType,
    ACCESS_TOKEN_EXPIRY_MINUTES, JWT_AUDIENCE, JWT_ISSUER, REFRESH_TOKEN_EXPIRY_DAYS,
};
pub use user::{normalize_email, Permission, Role, User};
