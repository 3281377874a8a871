use actix_web::{web, HttpResponse};
use rk_core::repositories::{KeyRecordRepository, UserRepository};
use rk_core::PasswordHasher;

use crate::dto::{LogoutRequest, MessageResponse};
use crate::handlers::handle_domain_error;
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

/// Handler for POST /api/v1/users/logout
///
/// Revokes the caller's key record, so no outstanding refresh token can be
/// exchanged again. Requires authentication via Bearer token. The body is
/// optional; a refresh token in it must belong to the caller.
///
/// # Headers
///
/// ```text
/// Authorization: Bearer {access_token}
/// ```
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Logged out successfully"
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Missing or invalid access token, or a refresh token of another user
/// - 503 Service Unavailable: Key record store unreachable
pub async fn logout<U, K, P>(
    state: web::Data<AppState<U, K, P>>,
    auth: AuthContext,
    request: Option<web::Json<LogoutRequest>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    K: KeyRecordRepository + 'static,
    P: PasswordHasher + 'static,
{
    let request = request.map(web::Json::into_inner).unwrap_or_default();

    match state
        .auth_service
        .logout(auth.user_id, request.refresh_token.as_deref())
        .await
    {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("Logged out successfully")),
        Err(error) => handle_domain_error(error),
    }
}
