use actix_web::web;
use bcrypt::DEFAULT_COST;
use chrono::Duration;
use std::sync::Arc;

use crate::auth::{AuthService, AuthSettings, TokenIssuer};
use crate::config::Config;
use crate::profile::ProfileService;
use crate::store::{ProfileStore, UserDirectory};

/// The shared services every worker's `App` is built from.
#[derive(Clone)]
pub struct AppState {
    pub auth: web::Data<AuthService>,
    pub profiles: web::Data<ProfileService>,
    pub users: web::Data<dyn UserDirectory>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserDirectory>,
        profiles: Arc<dyn ProfileStore>,
        tokens: TokenIssuer,
        settings: AuthSettings,
    ) -> Self {
        Self {
            auth: web::Data::new(AuthService::new(users.clone(), tokens, settings)),
            profiles: web::Data::new(ProfileService::new(users.clone(), profiles)),
            users: web::Data::from(users),
        }
    }

    pub fn from_config(
        config: &Config,
        users: Arc<dyn UserDirectory>,
        profiles: Arc<dyn ProfileStore>,
    ) -> Self {
        let tokens = TokenIssuer::new(
            config.jwt_secret.clone(),
            Duration::hours(config.jwt_expiration_hours),
        );
        let settings = AuthSettings {
            bcrypt_cost: DEFAULT_COST,
            verification_ttl: Duration::hours(config.verification_token_ttl_hours),
            public_base_url: config.public_base_url.clone(),
        };
        Self::new(users, profiles, tokens, settings)
    }

    /// Adds the services as app data; pass to `App::configure`.
    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.auth.clone())
            .app_data(self.profiles.clone())
            .app_data(self.users.clone());
    }
}
