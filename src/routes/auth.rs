use crate::{
    auth::{
        middleware::bearer_token, AuthService, LoginRequest, SignupRequest, VerifyEmailRequest,
        SIGNUP_SUCCESSFUL,
    },
    error::AppError,
};
use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    #[serde(rename = "userId")]
    pub user_id: String,
}

fn success(message: &str) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "success",
        "message": message
    }))
}

/// Register a new account
///
/// Creates an unverified user. The verification link is written to the log.
#[post("/signup")]
pub async fn signup(
    auth: web::Data<AuthService>,
    signup_data: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    auth.signup(signup_data.into_inner()).await?;
    Ok(HttpResponse::Created().json(json!({
        "status": "success",
        "message": SIGNUP_SUCCESSFUL
    })))
}

/// Login user
///
/// Authenticates a user and returns an authentication token.
#[post("/login")]
pub async fn login(
    auth: web::Data<AuthService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let response = auth.login(login_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Verify an email address from the link sent at signup.
#[get("/verify")]
pub async fn verify(
    auth: web::Data<AuthService>,
    query: web::Query<TokenQuery>,
) -> Result<impl Responder, AppError> {
    let message = auth.verify_email(&query.token).await?;
    Ok(success(message))
}

/// Verify an email address with the token in a JSON body.
#[post("/verify-email")]
pub async fn verify_email(
    auth: web::Data<AuthService>,
    body: web::Json<VerifyEmailRequest>,
) -> Result<impl Responder, AppError> {
    let message = auth.verify_email(&body.token).await?;
    Ok(success(message))
}

/// End every session of the user given in `?userId=`.
///
/// Unauthenticated: any caller who knows a user id can log that user out
/// everywhere. Use `/logout-token` to end only the caller's own session.
#[post("/logout")]
pub async fn logout(
    auth: web::Data<AuthService>,
    query: web::Query<UserIdQuery>,
) -> Result<impl Responder, AppError> {
    let message = auth.logout(&query.user_id).await?;
    Ok(success(message))
}

/// End the session of the bearer token presented.
#[post("/logout-token")]
pub async fn logout_token(
    auth: web::Data<AuthService>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let header = req
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok());
    let token =
        bearer_token(header).ok_or_else(|| AppError::Unauthorized("Missing token".into()))?;
    let message = auth.logout_with_token(token)?;
    Ok(success(message))
}
