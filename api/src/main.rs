use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use rk_core::repositories::{KeyRecordRepository, UserRepository};
use rk_core::{AuthService, BcryptPasswordHasher, TokenCodec, TokenServiceConfig};
use rk_infra::{
    DatabasePool, InMemoryKeyRecordRepository, InMemoryUserRepository, MySqlKeyRecordRepository,
    MySqlUserRepository,
};
use rk_shared::{AppConfig, StoreBackend};

use rk_api::app::{create_app, HttpSettings};
use rk_api::routes::{AppState, StoreProbe};
use rk_api::{config, telemetry};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load().context("Failed to load configuration")?;
    telemetry::init_tracing(&config.logging);

    tracing::info!(environment = %config.environment, "Starting Rotakey API server");

    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("Refusing to start with invalid configuration")?;

    let codec = Arc::new(TokenCodec::new(TokenServiceConfig::from_jwt_config(
        &config.auth.jwt,
    )?)?);
    let hasher = Arc::new(BcryptPasswordHasher::new(config.auth.bcrypt_cost)?);
    tracing::info!(
        algorithm = ?codec.config().algorithm,
        bcrypt_cost = hasher.cost(),
        "Credential and token services ready"
    );

    match config.database.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store; sessions are lost on restart");
            let auth_service = Arc::new(AuthService::new(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryKeyRecordRepository::new()),
                hasher,
                codec,
            ));
            serve(AppState::new(auth_service, StoreProbe::Memory), &config).await?;
        }
        StoreBackend::MySql => {
            let pool = DatabasePool::new(&config.database).await?;
            if config.database.auto_migrate {
                pool.run_migrations().await?;
            }

            let auth_service = Arc::new(AuthService::new(
                Arc::new(MySqlUserRepository::new(pool.get_pool().clone())),
                Arc::new(MySqlKeyRecordRepository::new(pool.get_pool().clone())),
                hasher,
                codec,
            ));
            serve(
                AppState::new(auth_service, StoreProbe::MySql(pool.clone())),
                &config,
            )
            .await?;

            pool.close().await;
        }
    }

    tracing::info!("Server stopped");
    Ok(())
}

async fn serve<U, K>(state: AppState<U, K>, config: &AppConfig) -> std::io::Result<()>
where
    U: UserRepository + 'static,
    K: KeyRecordRepository + 'static,
{
    let state = web::Data::new(state);
    let settings = HttpSettings {
        cors: config.cors.clone(),
        max_payload_size: config.server.max_payload_size,
    };
    let bind_address = config.server.bind_address();

    tracing::info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(state.clone(), &settings))
        .keep_alive(Duration::from_secs(config.server.keep_alive));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await
}
