use crate::{
    auth::AuthenticatedUserId,
    error::AppError,
    models::{ProfileFields, ProfileUpdateResponse},
    profile::ProfileService,
};
use actix_web::{get, post, put, web, HttpResponse, Responder};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct MeQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

fn ensure_same_user(authenticated: &AuthenticatedUserId, requested: &str) -> Result<(), AppError> {
    if authenticated.0 != requested {
        return Err(AppError::Forbidden(
            "Token does not belong to the requested user".into(),
        ));
    }
    Ok(())
}

/// Returns the caller's profile summary.
///
/// ## Query Parameters:
/// - `userId` (optional): must match the token's user when given.
///
/// ## Responses:
/// - `200 OK`: a `ProfileSummary`, including a "not started" summary when no profile exists.
/// - `401 Unauthorized`: missing or ended session.
/// - `403 Forbidden`: `userId` names someone else.
/// - `404 Not Found`: the token's user no longer exists.
#[get("/talent/me")]
pub async fn get_my_profile(
    profiles: web::Data<ProfileService>,
    user: AuthenticatedUserId,
    query: web::Query<MeQuery>,
) -> Result<impl Responder, AppError> {
    if let Some(requested) = &query.user_id {
        ensure_same_user(&user, requested)?;
    }
    let summary = profiles.get_profile_summary(&user.0).await?;
    Ok(HttpResponse::Ok().json(summary))
}

async fn write_profile(
    profiles: web::Data<ProfileService>,
    user: AuthenticatedUserId,
    user_id: web::Path<String>,
    fields: web::Json<ProfileFields>,
) -> Result<HttpResponse, AppError> {
    ensure_same_user(&user, &user_id)?;
    let (message, completeness) = profiles
        .update_profile(&user_id, fields.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ProfileUpdateResponse {
        status: "success".into(),
        message,
        completeness,
    }))
}

/// Creates or replaces the talent profile of `{user_id}`.
///
/// The body replaces every profile field; omitted fields are cleared.
///
/// ## Responses:
/// - `200 OK`: `{status, message, completeness}`.
/// - `403 Forbidden`: the email is not verified, or the path names someone else.
/// - `404 Not Found`: unknown user.
/// - `422 Unprocessable Entity`: transcript, statement of purpose or bio too long.
#[post("/talent/{user_id}")]
pub async fn create_or_update_profile(
    profiles: web::Data<ProfileService>,
    user: AuthenticatedUserId,
    user_id: web::Path<String>,
    fields: web::Json<ProfileFields>,
) -> Result<impl Responder, AppError> {
    write_profile(profiles, user, user_id, fields).await
}

/// Same as `create_or_update_profile`, under PUT.
#[put("/talent/{user_id}")]
pub async fn replace_profile(
    profiles: web::Data<ProfileService>,
    user: AuthenticatedUserId,
    user_id: web::Path<String>,
    fields: web::Json<ProfileFields>,
) -> Result<impl Responder, AppError> {
    write_profile(profiles, user, user_id, fields).await
}
