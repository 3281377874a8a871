//! Mapping of domain errors to HTTP responses
//!
//! Every failure leaves the API as the shared `ErrorResponse` envelope with a
//! stable error code. Invalid credentials never reveal which factor failed.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use rk_core::errors::{AuthError, DomainError, TokenError};
use rk_shared::{error_codes, ErrorResponse};
use validator::ValidationErrors;

/// Error type returned by handlers and middleware
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Request body failed validation
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationErrors),

    /// Request could not be parsed
    #[error("{0}")]
    BadRequest(String),

    /// Missing or unusable bearer credentials
    #[error("{0}")]
    Unauthorized(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    /// Error code and client-facing message
    fn code_and_message(&self) -> (&'static str, String) {
        match self {
            ApiError::Domain(error) => domain_code_and_message(error),
            ApiError::Validation(_) => (
                error_codes::VALIDATION_ERROR,
                "Request validation failed".to_string(),
            ),
            ApiError::BadRequest(message) => (error_codes::BAD_REQUEST, message.clone()),
            ApiError::Unauthorized(message) => (error_codes::UNAUTHORIZED, message.clone()),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(error) => domain_status(error),
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (code, message) = self.code_and_message();
        let mut body = ErrorResponse::new(code, message);

        if let ApiError::Validation(errors) = self {
            for (field, field_errors) in errors.field_errors() {
                let codes: Vec<String> = field_errors.iter().map(|e| e.code.to_string()).collect();
                body = body.add_detail(field.to_string(), codes);
            }
        }

        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match domain_status(&error) {
        status if status.is_server_error() => {
            tracing::error!(error = %error, "Request failed");
        }
        _ => {
            tracing::debug!(error = %error, "Request rejected");
        }
    }

    ApiError::Domain(error).error_response()
}

fn domain_status(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::InvalidCredentials | AuthError::SuspiciousActivity => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::UserAlreadyExists => StatusCode::CONFLICT,
            AuthError::WeakPassword => StatusCode::BAD_REQUEST,
        },
        DomainError::Token(token_error) => match token_error {
            TokenError::KeyLoadError { .. } | TokenError::TokenGenerationFailed => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::UNAUTHORIZED,
        },
        DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        DomainError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn domain_code_and_message(error: &DomainError) -> (&'static str, String) {
    match error {
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::InvalidCredentials => (
                error_codes::INVALID_CREDENTIALS,
                "Invalid credentials".to_string(),
            ),
            AuthError::SuspiciousActivity => (
                error_codes::SUSPICIOUS_ACTIVITY,
                "Refresh token reuse detected; please log in again".to_string(),
            ),
            AuthError::UserNotFound => (error_codes::USER_NOT_FOUND, "User not found".to_string()),
            AuthError::UserAlreadyExists => (
                error_codes::USER_ALREADY_EXISTS,
                "A user with this email already exists".to_string(),
            ),
            AuthError::WeakPassword => (error_codes::WEAK_PASSWORD, auth_error.to_string()),
        },
        DomainError::Token(TokenError::Expired) => {
            (error_codes::TOKEN_EXPIRED, "Token has expired".to_string())
        }
        DomainError::Token(TokenError::KeyLoadError { .. })
        | DomainError::Token(TokenError::TokenGenerationFailed) => (
            error_codes::INTERNAL_ERROR,
            "An internal error occurred".to_string(),
        ),
        DomainError::Token(_) => (error_codes::TOKEN_INVALID, "Invalid token".to_string()),
        DomainError::Validation { message } => (error_codes::VALIDATION_ERROR, message.clone()),
        DomainError::StoreUnavailable { .. } => (
            error_codes::STORE_UNAVAILABLE,
            "Service temporarily unavailable".to_string(),
        ),
        DomainError::Internal { .. } => (
            error_codes::INTERNAL_ERROR,
            "An internal error occurred".to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_status_mapping() {
        let cases = [
            (DomainError::Auth(AuthError::InvalidCredentials), 401),
            (DomainError::Auth(AuthError::SuspiciousActivity), 401),
            (DomainError::Auth(AuthError::UserNotFound), 404),
            (DomainError::Auth(AuthError::UserAlreadyExists), 409),
            (DomainError::Auth(AuthError::WeakPassword), 400),
            (DomainError::Token(TokenError::Expired), 401),
            (DomainError::Token(TokenError::UnknownToken), 401),
            (DomainError::Token(TokenError::TokenGenerationFailed), 500),
            (
                DomainError::StoreUnavailable {
                    message: "down".to_string(),
                },
                503,
            ),
            (
                DomainError::Internal {
                    message: "boom".to_string(),
                },
                500,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(domain_status(&error).as_u16(), expected, "{:?}", error);
        }
    }

    #[test]
    fn test_store_details_are_not_leaked() {
        let error = DomainError::StoreUnavailable {
            message: "mysql://root:secret@db refused".to_string(),
        };
        let (code, message) = domain_code_and_message(&error);

        assert_eq!(code, error_codes::STORE_UNAVAILABLE);
        assert!(!message.contains("secret"));
    }
}
