use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use sqlx::PgPool;
use std::io;
use std::sync::Arc;

use talentforge::config::Config;
use talentforge::routes;
use talentforge::store::{MemoryStore, PgStore, ProfileStore, UserDirectory};
use talentforge::AppState;

fn io_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env().map_err(|e| io_error("invalid configuration", e))?;

    let (users, profiles): (Arc<dyn UserDirectory>, Arc<dyn ProfileStore>) =
        match &config.database_url {
            Some(database_url) => {
                let pool = PgPool::connect(database_url)
                    .await
                    .map_err(|e| io_error("failed to connect to database", e))?;
                let store = Arc::new(PgStore::new(pool));
                store
                    .run_migrations()
                    .await
                    .map_err(|e| io_error("failed to apply migrations", e))?;
                let users: Arc<dyn UserDirectory> = store.clone();
                let profiles: Arc<dyn ProfileStore> = store;
                (users, profiles)
            }
            None => {
                log::warn!("DATABASE_URL not set; accounts and profiles are kept in memory");
                let store = Arc::new(MemoryStore::new());
                let users: Arc<dyn UserDirectory> = store.clone();
                let profiles: Arc<dyn ProfileStore> = store;
                (users, profiles)
            }
        };

    let state = AppState::from_config(&config, users, profiles);

    log::info!("Starting TalentForge server at {}", config.server_url());
    HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(|cfg| state.register(cfg))
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
