#![allow(dead_code)]

use actix_web::{body::MessageBody, dev::ServiceResponse, test};
use chrono::Duration;
use serde_json::json;
use std::sync::Arc;
use talentforge::auth::{AuthResponse, AuthSettings, TokenIssuer};
use talentforge::store::{MemoryStore, UserDirectory};
use talentforge::AppState;

pub const PASSWORD: &str = "password123";

/// In-memory state with a cheap bcrypt cost so tests stay fast.
pub fn test_state() -> (Arc<MemoryStore>, AppState) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(
        store.clone(),
        store.clone(),
        TokenIssuer::new("integration-test-secret", Duration::hours(1)),
        AuthSettings {
            bcrypt_cost: 4,
            verification_ttl: Duration::hours(24),
            public_base_url: "http://localhost:8080".into(),
        },
    );
    (store, state)
}

pub struct TestUser {
    pub id: String,
    pub token: String,
}

pub async fn signup<S, B>(app: &S, email: &str) -> u16
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({ "email": email, "password": PASSWORD }))
        .to_request();
    test::call_service(app, req).await.status().as_u16()
}

pub async fn login<S, B>(app: &S, email: &str) -> Result<TestUser, String>
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": email, "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    if !status.is_success() {
        return Err(format!(
            "Failed to log in. Status: {}. Body: {}",
            status,
            String::from_utf8_lossy(&body)
        ));
    }
    let auth: AuthResponse = serde_json::from_slice(&body)
        .map_err(|e| format!("Failed to parse login response: {}", e))?;
    Ok(TestUser {
        id: auth.user_id,
        token: auth.token,
    })
}

/// Signs up, optionally follows the verification link, and logs in.
pub async fn onboard<S, B>(
    app: &S,
    store: &MemoryStore,
    email: &str,
    verified: bool,
) -> TestUser
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    B: MessageBody,
{
    assert_eq!(signup(app, email).await, 201, "signup failed for {}", email);

    if verified {
        let token = verification_token(store, email).await;
        let req = test::TestRequest::get()
            .uri(&format!("/api/auth/verify?token={}", token))
            .to_request();
        let resp = test::call_service(app, req).await;
        assert!(resp.status().is_success(), "verification failed for {}", email);
    }

    login(app, email).await.expect("login after signup")
}

pub async fn verification_token(store: &MemoryStore, email: &str) -> String {
    store
        .find_by_email(email)
        .await
        .expect("store lookup")
        .expect("user exists")
        .verification_token
        .expect("pending verification token")
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
