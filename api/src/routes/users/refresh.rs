use actix_web::{web, HttpResponse, ResponseError};
use rk_core::repositories::{KeyRecordRepository, UserRepository};
use rk_core::PasswordHasher;
use validator::Validate;

use crate::dto::RefreshTokenRequest;
use crate::handlers::{handle_domain_error, ApiError};
use crate::routes::AppState;

/// Handler for POST /api/v1/users/token/refresh
///
/// Exchanges a refresh token for a new pair. Each refresh token can be
/// exchanged once; presenting it again revokes the session.
///
/// # Request Body
///
/// ```json
/// {
///     "refresh_token": "eyJ..."
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: `TOKEN_INVALID`, `TOKEN_EXPIRED` or `SUSPICIOUS_ACTIVITY`
/// - 404 Not Found: Identity deleted since login
/// - 503 Service Unavailable: Key record store unreachable
pub async fn refresh_token<U, K, P>(
    state: web::Data<AppState<U, K, P>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    K: KeyRecordRepository + 'static,
    P: PasswordHasher + 'static,
{
    if let Err(errors) = request.validate() {
        return ApiError::from(errors).error_response();
    }

    match state.auth_service.refresh(&request.refresh_token).await {
        Ok(auth_response) => HttpResponse::Ok().json(auth_response),
        Err(error) => handle_domain_error(error),
    }
}
