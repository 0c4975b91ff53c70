use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// An account as held by the user directory.
///
/// The password hash and verification token never leave the server; they are
/// skipped when a `User` is serialized.
#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub verified: bool,
    #[serde(skip_serializing)]
    pub verification_token: Option<String>,
    #[serde(skip_serializing)]
    pub verification_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates an unverified user with a fresh verification token valid for `token_ttl`.
    pub fn new_unverified(email: String, password_hash: String, token_ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            email,
            password_hash,
            verified: false,
            verification_token: Some(Uuid::new_v4().to_string()),
            verification_expires_at: Some(now + token_ttl),
            created_at: now,
        }
    }

    pub fn verification_expired(&self, now: DateTime<Utc>) -> bool {
        self.verification_expires_at
            .map(|expires_at| expires_at <= now)
            .unwrap_or(true)
    }
}
