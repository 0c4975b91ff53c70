use actix_web::{get, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

fn health_body() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "timestamp": Utc::now()
    }))
}

/// Health check endpoint
///
/// Returns the current status of the API and timestamp.
#[get("/health")]
pub async fn health() -> impl Responder {
    health_body()
}

/// Same probe under the well-known path load balancers poll.
#[get("/.well-known/health")]
pub async fn well_known_health() -> impl Responder {
    health_body()
}
