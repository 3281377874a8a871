//! Shared setup for API integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{http::header, test, web};
use rk_api::routes::{AppState, StoreProbe};
use rk_core::{AuthService, BcryptPasswordHasher, TokenCodec, TokenServiceConfig};
use rk_infra::{InMemoryKeyRecordRepository, InMemoryUserRepository};
use serde_json::{json, Value};

pub const TEST_SECRET: &str = "api-test-secret";
pub const PASSWORD: &str = "P@ssw0rd1";

pub type TestState = AppState<InMemoryUserRepository, InMemoryKeyRecordRepository>;

/// Builds the application service around a state
macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(rk_api::app::create_app(
            $state,
            &rk_api::app::HttpSettings::default(),
        ))
        .await
    };
}

pub fn test_codec() -> Arc<TokenCodec> {
    Arc::new(TokenCodec::new(TokenServiceConfig::with_secret(TEST_SECRET)).unwrap())
}

/// State on in-memory stores with a cheap bcrypt cost
pub fn test_state() -> web::Data<TestState> {
    let auth_service = Arc::new(AuthService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryKeyRecordRepository::new()),
        Arc::new(BcryptPasswordHasher::new(4).unwrap()),
        test_codec(),
    ));

    web::Data::new(AppState::new(auth_service, StoreProbe::Memory))
}

pub fn post_json(uri: &str, body: Value) -> test::TestRequest {
    test::TestRequest::post().uri(uri).set_json(body)
}

pub fn bearer(request: test::TestRequest, token: &str) -> test::TestRequest {
    request.insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
}

pub fn signup_body(email: &str) -> Value {
    json!({ "email": email, "password": PASSWORD, "role": "shop_owner" })
}

pub fn login_body(email: &str) -> Value {
    json!({ "identifier": email, "password": PASSWORD })
}
