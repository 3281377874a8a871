//! Bearer token handling on protected routes

#[macro_use]
mod common;

use actix_web::{http::StatusCode, test, web};
use chrono::Duration;
use common::*;
use rk_core::domain::entities::token::{Claims, TokenType};
use rk_core::domain::entities::user::Role;
use rk_core::{TokenCodec, TokenServiceConfig};
use serde_json::Value;
use uuid::Uuid;

/// Calls a route and returns status and JSON body, whether the middleware
/// rejected the request or a handler answered it
macro_rules! call_json {
    ($app:expr, $req:expr) => {{
        match test::try_call_service(&$app, $req).await {
            Ok(resp) => {
                let status = resp.status();
                let body: Value = test::read_body_json(resp).await;
                (status, body)
            }
            Err(error) => {
                let resp = error.error_response();
                let status = resp.status();
                let bytes = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
                (status, serde_json::from_slice::<Value>(&bytes).unwrap())
            }
        }
    }};
}

async fn login_tokens() -> (web::Data<TestState>, Value) {
    let state = test_state();
    let app = init_app!(state.clone());
    test::call_service(
        &app,
        post_json("/api/v1/users/signup", signup_body("alice@example.com")).to_request(),
    )
    .await;
    let resp = test::call_service(
        &app,
        post_json("/api/v1/users/login", login_body("alice@example.com")).to_request(),
    )
    .await;
    (state, test::read_body_json(resp).await)
}

#[actix_web::test]
async fn test_missing_authorization_header() {
    let app = init_app!(test_state());

    let (status, body) = call_json!(
        app,
        test::TestRequest::get().uri("/api/v1/users/me").to_request()
    );

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[actix_web::test]
async fn test_malformed_bearer_token() {
    let app = init_app!(test_state());

    let (status, body) = call_json!(
        app,
        bearer(test::TestRequest::get().uri("/api/v1/users/me"), "not.a.jwt").to_request()
    );

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "TOKEN_INVALID");
}

#[actix_web::test]
async fn test_refresh_token_is_not_a_bearer() {
    let (state, tokens) = login_tokens().await;
    let app = init_app!(state);
    let refresh = tokens["refresh_token"].as_str().unwrap();

    let (status, body) = call_json!(
        app,
        bearer(test::TestRequest::get().uri("/api/v1/users/me"), refresh).to_request()
    );

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "TOKEN_INVALID");
}

#[actix_web::test]
async fn test_expired_access_token() {
    let codec = test_codec();
    let claims = Claims::new(
        Uuid::new_v4(),
        TokenType::Access,
        Duration::seconds(-30),
        &codec.config().issuer,
        &codec.config().audience,
    ).unwrap()
    .with_role(Role::Customer);
    let expired = codec.encode_claims(&claims).unwrap();
    let app = init_app!(test_state());

    let (status, body) = call_json!(
        app,
        bearer(test::TestRequest::get().uri("/api/v1/users/me"), &expired).to_request()
    );

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "TOKEN_EXPIRED");
}

#[actix_web::test]
async fn test_token_signed_with_another_secret() {
    let foreign = TokenCodec::new(TokenServiceConfig::with_secret("someone-else")).unwrap();
    let pair = foreign.issue_pair(Uuid::new_v4(), Role::Admin).unwrap();
    let app = init_app!(test_state());

    let (status, body) = call_json!(
        app,
        bearer(
            test::TestRequest::get().uri("/api/v1/users/me"),
            &pair.access_token
        )
        .to_request()
    );

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "TOKEN_INVALID");
}

#[actix_web::test]
async fn test_valid_access_token_after_logout() {
    let (state, tokens) = login_tokens().await;
    let app = init_app!(state);
    let access = tokens["access_token"].as_str().unwrap();

    let (status, _) = call_json!(
        app,
        bearer(test::TestRequest::post().uri("/api/v1/users/logout"), access).to_request()
    );
    assert_eq!(status, StatusCode::OK);

    // Access tokens stay valid until they expire
    let (status, body) = call_json!(
        app,
        bearer(test::TestRequest::get().uri("/api/v1/users/me"), access).to_request()
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "shop_owner");
}

#[actix_web::test]
async fn test_logout_with_foreign_refresh_token() {
    let (state, tokens) = login_tokens().await;
    let app = init_app!(state);
    let access = tokens["access_token"].as_str().unwrap();

    let other = test_codec().issue_pair(Uuid::new_v4(), Role::Customer).unwrap();
    let (status, body) = call_json!(
        app,
        bearer(
            post_json(
                "/api/v1/users/logout",
                serde_json::json!({ "refresh_token": other.refresh_token })
            ),
            access
        )
        .to_request()
    );

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "TOKEN_INVALID");
}
