use actix_web::{web, HttpResponse};
use rk_core::repositories::{KeyRecordRepository, UserRepository};
use rk_core::PasswordHasher;

use crate::dto::UserResponse;
use crate::handlers::handle_domain_error;
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

/// Handler for GET /api/v1/users/me
///
/// Returns the authenticated identity with its role and permissions.
pub async fn me<U, K, P>(state: web::Data<AppState<U, K, P>>, auth: AuthContext) -> HttpResponse
where
    U: UserRepository + 'static,
    K: KeyRecordRepository + 'static,
    P: PasswordHasher + 'static,
{
    match state.auth_service.current_user(auth.user_id).await {
        Ok(user) => HttpResponse::Ok().json(UserResponse::from(user)),
        Err(error) => handle_domain_error(error),
    }
}
