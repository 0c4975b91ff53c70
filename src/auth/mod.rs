pub mod extractors;
pub mod middleware;
pub mod password;
pub mod session;
pub mod token;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::AppError;
use crate::models::User;
use crate::store::{StoreError, UserDirectory};

// Re-export necessary items
pub use extractors::AuthenticatedUserId;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use session::SessionRegistry;
pub use token::{Claims, TokenIssuer};

pub const SIGNUP_SUCCESSFUL: &str = "Signup successful. Please verify your email.";
pub const LOGIN_SUCCESS: &str = "LOGIN_SUCCESS";
pub const EMAIL_VERIFIED: &str = "EMAIL_VERIFIED_SUCCESSFULLY";
pub const LOGOUT_SUCCESSFUL: &str = "LOGOUT_SUCCESSFUL";

/// Represents the payload for a new account.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    /// Must be a valid email format.
    #[validate(email)]
    pub email: String,
    /// Must be at least 8 characters long.
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Represents the payload for a user login request.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyEmailRequest {
    pub token: String,
}

/// Response structure after a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub status: String,
    pub message: String,
    /// The JWT for session authentication.
    pub token: String,
    pub user_id: String,
    pub verified: bool,
}

/// Knobs the auth service reads from configuration.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub bcrypt_cost: u32,
    pub verification_ttl: Duration,
    /// Base of the link logged for email verification.
    pub public_base_url: String,
}

/// Signup, login, email verification and logout.
pub struct AuthService {
    users: Arc<dyn UserDirectory>,
    tokens: TokenIssuer,
    sessions: SessionRegistry,
    settings: AuthSettings,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserDirectory>, tokens: TokenIssuer, settings: AuthSettings) -> Self {
        Self {
            users,
            tokens,
            sessions: SessionRegistry::new(),
            settings,
        }
    }

    /// Creates an unverified account and logs its verification link.
    pub async fn signup(&self, request: SignupRequest) -> Result<User, AppError> {
        request.validate()?;
        let email = request.email.trim().to_lowercase();

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::BadRequest("EMAIL_IN_USE".into()));
        }

        let password_hash = hash_password(&request.password, self.settings.bcrypt_cost)?;
        let user = User::new_unverified(email, password_hash, self.settings.verification_ttl);
        let user = match self.users.insert(user).await {
            Ok(user) => user,
            Err(StoreError::Conflict(_)) => return Err(AppError::BadRequest("EMAIL_IN_USE".into())),
            Err(e) => return Err(e.into()),
        };

        if let Some(token) = &user.verification_token {
            log::info!(
                "verification link for {}: {}/api/auth/verify?token={}",
                user.email,
                self.settings.public_base_url.trim_end_matches('/'),
                token
            );
        }
        Ok(user)
    }

    /// Checks credentials and opens a session. Unverified accounts may log in.
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AppError> {
        request.validate()?;
        let email = request.email.trim().to_lowercase();

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("INVALID_CREDENTIALS".into()))?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(AppError::Unauthorized("INVALID_CREDENTIALS".into()));
        }

        let (token, claims) = self.tokens.generate(&user.id)?;
        self.sessions.open(&claims.sub, &claims.jti, claims.exp);
        log::info!("user {} logged in", user.id);

        Ok(AuthResponse {
            status: "success".into(),
            message: LOGIN_SUCCESS.into(),
            token,
            user_id: user.id,
            verified: user.verified,
        })
    }

    pub async fn verify_email(&self, token: &str) -> Result<&'static str, AppError> {
        let user = self
            .users
            .find_by_verification_token(token)
            .await?
            .ok_or_else(|| AppError::BadRequest("TOKEN_INVALID".into()))?;

        if user.verification_expired(Utc::now()) {
            return Err(AppError::BadRequest("TOKEN_EXPIRED".into()));
        }

        self.users.mark_verified(&user.id).await?;
        log::info!("user {} verified their email", user.id);
        Ok(EMAIL_VERIFIED)
    }

    /// Ends every session of `user_id`.
    pub async fn logout(&self, user_id: &str) -> Result<&'static str, AppError> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(AppError::NotFound("USER_NOT_FOUND".into()));
        }
        let closed = self.sessions.close_all(user_id);
        log::info!("user {} logged out of {} session(s)", user_id, closed);
        Ok(LOGOUT_SUCCESSFUL)
    }

    /// Ends the session the token belongs to.
    pub fn logout_with_token(&self, token: &str) -> Result<&'static str, AppError> {
        let claims = self
            .tokens
            .verify(token)
            .map_err(|_| AppError::Unauthorized("TOKEN_INVALID".into()))?;
        self.sessions.close(&claims.sub, &claims.jti);
        Ok(LOGOUT_SUCCESSFUL)
    }

    /// Accepts a bearer token only if it verifies and its session is still open.
    pub fn authenticate(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.tokens.verify(token)?;
        if !self.sessions.is_active(&claims.sub, &claims.jti) {
            return Err(AppError::Unauthorized("Session has ended".into()));
        }
        Ok(claims)
    }
}
