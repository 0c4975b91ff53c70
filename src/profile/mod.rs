pub mod completeness;

use std::sync::Arc;

use crate::error::AppError;
use crate::models::{ProfileFields, ProfileSummary};
use crate::store::{ProfileStore, UserDirectory};

pub use completeness::{
    compute_completeness, refresh_completeness, validate_and_merge, TRACKED_FIELDS,
};

pub const PROFILE_NOT_STARTED: &str = "Profile not started. Complete your profile to get started!";
pub const PROFILE_LOADED: &str = "Profile loaded successfully";

/// Reads and writes talent profiles on behalf of a user.
///
/// Holds no state of its own beyond its two collaborators. Concurrent writes for
/// the same user are last-write-wins.
#[derive(Clone)]
pub struct ProfileService {
    users: Arc<dyn UserDirectory>,
    profiles: Arc<dyn ProfileStore>,
}

impl ProfileService {
    pub fn new(users: Arc<dyn UserDirectory>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self { users, profiles }
    }

    /// Returns the account state and stored profile for `user_id`.
    ///
    /// A user without a profile yet gets a "not started" summary rather than an
    /// error. Verification is not required to read.
    pub async fn get_profile_summary(&self, user_id: &str) -> Result<ProfileSummary, AppError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("USER_NOT_FOUND".into()))?;

        match self.profiles.find_by_user_id(user_id).await? {
            Some(profile) => Ok(ProfileSummary::from_profile(
                profile,
                user.email,
                user.verified,
                PROFILE_LOADED,
            )),
            None => Ok(ProfileSummary {
                status: "success".to_string(),
                message: PROFILE_NOT_STARTED.to_string(),
                email: user.email,
                verified: user.verified,
                completeness: 0,
                missing_fields: TRACKED_FIELDS.iter().map(|name| name.to_string()).collect(),
                ..Default::default()
            }),
        }
    }

    /// Replaces the profile of a verified user with `fields` and returns the
    /// confirmation message together with the new completeness score.
    pub async fn update_profile(
        &self,
        user_id: &str,
        fields: ProfileFields,
    ) -> Result<(String, i32), AppError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("USER_NOT_FOUND".into()))?;

        if !user.verified {
            return Err(AppError::PreconditionFailed("EMAIL_NOT_VERIFIED".into()));
        }

        let existing = self.profiles.find_by_user_id(user_id).await?;
        let mut profile = validate_and_merge(user_id, existing, fields)?;
        completeness::refresh_completeness(&mut profile);

        let saved = self.profiles.save(profile).await?;
        log::info!(
            "profile {} for user {} saved at {}% complete",
            saved.id,
            user_id,
            saved.completeness
        );

        Ok((
            format!(
                "Talent profile updated successfully ({}% complete)",
                saved.completeness
            ),
            saved.completeness,
        ))
    }
}
