use crate::{error::AppError, store::UserDirectory};
use actix_web::{get, web, HttpResponse, Responder};

/// Lists every account. Password hashes and verification tokens are never serialized.
#[get("/users")]
pub async fn list_users(users: web::Data<dyn UserDirectory>) -> Result<impl Responder, AppError> {
    let users = users.list().await?;
    Ok(HttpResponse::Ok().json(users))
}
