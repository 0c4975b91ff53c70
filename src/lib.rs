#![doc = "The `talentforge` library crate."]
#![doc = ""]
#![doc = "Accounts (signup, login, email verification, logout) and talent profiles"]
#![doc = "with completeness scoring, served over HTTP by the binary in `main.rs`."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod profile;
pub mod routes;
pub mod state;
pub mod store;

pub use crate::error::AppError;
pub use crate::state::AppState;
