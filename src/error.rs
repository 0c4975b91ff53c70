//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Profile operations surface the four domain kinds (`NotFound`, `PreconditionFailed`,
//! `ValidationFailed`, `Internal`); the authentication routes add `BadRequest`,
//! `Unauthorized` and `Forbidden`.
//!
//! `AppError` implements `actix_web::error::ResponseError` so handlers can return it
//! directly. Every error body has the shape `{"status": "error", "message": "..."}`.
//! `From` implementations for `StoreError`, `validator::ValidationErrors`,
//! `jsonwebtoken::errors::Error` and `bcrypt::BcryptError` allow easy conversion
//! using the `?` operator.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

use crate::store::StoreError;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// A referenced user or resource does not exist (HTTP 404).
    NotFound(String),
    /// The caller exists but is not allowed to perform the operation yet,
    /// e.g. an unverified email (HTTP 403).
    PreconditionFailed(String),
    /// Input failed a field constraint (HTTP 422). Carries a human-readable reason.
    ValidationFailed(String),
    /// A malformed or otherwise rejected request (HTTP 400).
    BadRequest(String),
    /// Authentication failed or is missing (HTTP 401).
    Unauthorized(String),
    /// Authenticated, but acting on another user's resource (HTTP 403).
    Forbidden(String),
    /// Any other failure, typically a collaborator being unavailable (HTTP 500).
    Internal(String),
}

impl AppError {
    /// The message placed in the JSON error body.
    pub fn message(&self) -> String {
        match self {
            AppError::NotFound(msg)
            | AppError::PreconditionFailed(msg)
            | AppError::ValidationFailed(msg)
            | AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg) => msg.clone(),
            AppError::Internal(msg) => format!("Unexpected error: {}", msg),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::PreconditionFailed(msg) => write!(f, "Precondition Failed: {}", msg),
            AppError::ValidationFailed(msg) => write!(f, "Validation Failed: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PreconditionFailed(_) | AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Internal(cause) = self {
            log::error!("internal error: {}", cause);
        }
        HttpResponse::build(self.status_code()).json(json!({
            "status": "error",
            "message": self.message()
        }))
    }
}

/// Storage failures are opaque to the caller and become `AppError::Internal`.
impl From<StoreError> for AppError {
    fn from(error: StoreError) -> AppError {
        AppError::Internal(error.to_string())
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationFailed`.
///
/// The detailed validation messages are preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationFailed(error.to_string())
    }
}

/// Converts `jsonwebtoken::errors::Error` into `AppError::Unauthorized`.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(error.to_string())
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::Internal`.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(error.to_string())
    }
}
