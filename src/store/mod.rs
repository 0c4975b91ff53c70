//! Persistence seams for users and talent profiles.
//!
//! The profile engine and the auth service only ever see these traits.
//! `PgStore` backs them with PostgreSQL; `MemoryStore` keeps everything in
//! process and is used when no database is configured and throughout the tests.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use std::fmt;

use crate::models::{TalentProfile, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug)]
pub enum StoreError {
    /// A uniqueness constraint was violated, e.g. a second account for one email.
    Conflict(String),
    /// The backend failed or was unreachable.
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StoreError::Conflict(msg) => write!(f, "conflict: {}", msg),
            StoreError::Backend(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> StoreError {
        match &error {
            sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
                StoreError::Conflict(db_error.message().to_string())
            }
            _ => StoreError::Backend(error.to_string()),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Lookup and bookkeeping for user accounts.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_id(&self, user_id: &str) -> StoreResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    async fn find_by_verification_token(&self, token: &str) -> StoreResult<Option<User>>;

    /// Fails with `StoreError::Conflict` if the email is already registered.
    async fn insert(&self, user: User) -> StoreResult<User>;

    /// Marks the user verified and clears any pending verification token.
    /// Fails with `StoreError::Backend` if no user has that id.
    async fn mark_verified(&self, user_id: &str) -> StoreResult<()>;

    async fn list(&self) -> StoreResult<Vec<User>>;
}

/// Talent profile persistence keyed by user id.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find_by_user_id(&self, user_id: &str) -> StoreResult<Option<TalentProfile>>;

    /// Inserts or replaces the profile for `profile.user_id` and returns the
    /// stored record with its timestamps filled in.
    async fn save(&self, profile: TalentProfile) -> StoreResult<TalentProfile>;
}
