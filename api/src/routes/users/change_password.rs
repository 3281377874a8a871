use actix_web::{web, HttpResponse, ResponseError};
use rk_core::repositories::{KeyRecordRepository, UserRepository};
use rk_core::PasswordHasher;
use validator::Validate;

use crate::dto::{ChangePasswordRequest, MessageResponse};
use crate::handlers::{handle_domain_error, ApiError};
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

/// Handler for POST /api/v1/users/change-password
///
/// Replaces the caller's password and revokes their session. Access tokens
/// already issued stay valid until they expire.
///
/// ## Errors
/// - 400 Bad Request: New password violates the policy
/// - 401 Unauthorized: Current password did not verify
pub async fn change_password<U, K, P>(
    state: web::Data<AppState<U, K, P>>,
    auth: AuthContext,
    request: web::Json<ChangePasswordRequest>,
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
        .change_password(auth.user_id, &request.current_password, &request.new_password)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("Password changed; please log in again")),
        Err(error) => handle_domain_error(error),
    }
}
