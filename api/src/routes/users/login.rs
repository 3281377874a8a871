use actix_web::{web, HttpResponse, ResponseError};
use rk_core::repositories::{KeyRecordRepository, UserRepository};
use rk_core::PasswordHasher;
use validator::Validate;

use crate::dto::LoginRequest;
use crate::handlers::{handle_domain_error, ApiError};
use crate::routes::AppState;

/// Handler for POST /api/v1/users/login
///
/// # Request Body
///
/// ```json
/// {
///     "identifier": "alice@example.com",
///     "password": "P@ssw0rd1"
/// }
/// ```
///
/// `identifier` is a user id or an email; `email` is accepted as an alias.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "eyJ...",
///     "token_type": "bearer",
///     "expires_in": 900,
///     "refresh_expires_in": 604800,
///     "role": "shop_owner"
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Unknown identity or wrong password, indistinguishably
/// - 503 Service Unavailable: Key record store unreachable
pub async fn login<U, K, P>(
    state: web::Data<AppState<U, K, P>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    K: KeyRecordRepository + 'static,
    P: PasswordHasher + 'static,
{
    if let Err(errors) = request.validate() {
        return ApiError::from(errors).error_response();
    }

    match state
        .auth_service
        .login(&request.identifier, &request.password)
        .await
    {
        Ok(auth_response) => HttpResponse::Ok().json(auth_response),
        Err(error) => handle_domain_error(error),
    }
}
