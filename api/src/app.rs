//! Application factory
//!
//! Builds the Actix-web application around an `AppState`. Generic over the
//! repositories so the same routing serves the MySQL and in-memory stores.

use actix_web::{web, App, HttpResponse};
use rk_core::repositories::{KeyRecordRepository, UserRepository};
use rk_core::PasswordHasher;
use rk_shared::{error_codes, CorsConfig, ErrorResponse};
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use crate::handlers::ApiError;
use crate::middleware::{auth::JwtAuth, cors::create_cors};
use crate::routes::health::health_check;
use crate::routes::users::{change_password, login, logout, me, refresh_token, signup};
use crate::routes::AppState;

/// HTTP-level settings applied to the application
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub cors: CorsConfig,
    /// Maximum JSON payload size in bytes
    pub max_payload_size: usize,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            cors: CorsConfig::development(),
            max_payload_size: 64 * 1024,
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<U, K, P>(
    app_state: web::Data<AppState<U, K, P>>,
    settings: &HttpSettings,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    K: KeyRecordRepository + 'static,
    P: PasswordHasher + 'static,
{
    let jwt_auth = JwtAuth::new(Arc::clone(app_state.auth_service.codec()));

    let json_config = web::JsonConfig::default()
        .limit(settings.max_payload_size)
        .error_handler(|err, _req| ApiError::bad_request(err.to_string()).into());

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        // Order matters: the last wrap runs first
        .wrap(create_cors(&settings.cors))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check::<U, K, P>))
        .service(
            web::scope("/api/v1").service(
                web::scope("/users")
                    .route("/signup", web::post().to(signup::<U, K, P>))
                    .route("/login", web::post().to(login::<U, K, P>))
                    .route("/token/refresh", web::post().to(refresh_token::<U, K, P>))
                    .route(
                        "/logout",
                        web::post()
                            .to(logout::<U, K, P>)
                            .wrap(jwt_auth.clone()),
                    )
                    .route(
                        "/me",
                        web::get().to(me::<U, K, P>).wrap(jwt_auth.clone()),
                    )
                    .route(
                        "/change-password",
                        web::post()
                            .to(change_password::<U, K, P>)
                            .wrap(jwt_auth),
                    ),
            ),
        )
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
