pub mod auth;
pub mod health;
pub mod profile;
pub mod users;

use actix_web::web;

use crate::auth::AuthMiddleware;

/// Registers every route. Expects the services from `AppState::register` as app data.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health)
        .service(health::well_known_health)
        .service(
            web::scope("/api")
                .service(
                    web::scope("/auth")
                        .service(auth::signup)
                        .service(auth::login)
                        .service(auth::verify)
                        .service(auth::verify_email)
                        .service(auth::logout)
                        .service(auth::logout_token),
                )
                .service(
                    web::scope("/profile")
                        .wrap(AuthMiddleware)
                        .service(profile::get_my_profile)
                        .service(profile::create_or_update_profile)
                        .service(profile::replace_profile),
                )
                .service(
                    web::scope("/user")
                        .wrap(AuthMiddleware)
                        .service(users::list_users),
                ),
        );
}
