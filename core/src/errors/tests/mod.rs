use crate::domain::entities::token::TokenType;
use crate::errors::{AuthError, DomainError, TokenError};

#[test]
fn test_invalid_token_family() {
    for err in [
        TokenError::Expired,
        TokenError::InvalidSignature,
        TokenError::Malformed,
        TokenError::UnknownToken,
        TokenError::WrongType {
            expected: TokenType::Refresh,
            actual: TokenType::Access,
        },
    ] {
        assert!(DomainError::from(err).is_invalid_token());
    }

    assert!(!DomainError::from(TokenError::TokenGenerationFailed).is_invalid_token());
    assert!(!DomainError::from(AuthError::InvalidCredentials).is_invalid_token());
}

#[test]
fn test_suspicious_activity_detection() {
    assert!(DomainError::from(AuthError::SuspiciousActivity).is_suspicious_activity());
    assert!(!DomainError::from(TokenError::Expired).is_suspicious_activity());
}

#[test]
fn test_wrong_type_message() {
    let err = TokenError::WrongType {
        expected: TokenType::Refresh,
        actual: TokenType::Access,
    };
    assert_eq!(err.to_string(), "Wrong token type: expected refresh, got access");
}

#[test]
fn test_invalid_credentials_is_generic() {
    let message = AuthError::InvalidCredentials.to_string();
    assert!(!message.to_lowercase().contains("password"));
    assert!(!message.to_lowercase().contains("user"));
}
