use actix_web::{web, HttpResponse, ResponseError};
use rk_core::domain::entities::user::Role;
use rk_core::errors::DomainError;
use rk_core::repositories::{KeyRecordRepository, UserRepository};
use rk_core::PasswordHasher;
use validator::Validate;

use crate::dto::{SignupRequest, UserResponse};
use crate::handlers::{handle_domain_error, ApiError};
use crate::routes::AppState;

/// Handler for POST /api/v1/users/signup
///
/// # Request Body
///
/// ```json
/// {
///     "email": "alice@example.com",
///     "password": "P@ssw0rd1",
///     "role": "shop_owner"
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// The created user, without credentials. Signup does not log the user in.
///
/// ## Errors
/// - 400 Bad Request: Invalid email, weak password or a self-assigned admin role
/// - 409 Conflict: Email already registered
pub async fn signup<U, K, P>(
    state: web::Data<AppState<U, K, P>>,
    request: web::Json<SignupRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    K: KeyRecordRepository + 'static,
    P: PasswordHasher + 'static,
{
    if let Err(errors) = request.validate() {
        return ApiError::from(errors).error_response();
    }

    if request.role == Role::Admin {
        return handle_domain_error(DomainError::Validation {
            message: "The admin role cannot be self-assigned".to_string(),
        });
    }

    match state
        .auth_service
        .register(&request.email, &request.password, request.role)
        .await
    {
        Ok(user) => HttpResponse::Created().json(UserResponse::from(user)),
        Err(error) => handle_domain_error(error),
    }
}
