use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The profile fields a caller may write.
///
/// Every field is optional on the wire; a field left out of the request body
/// is treated the same as an explicit `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProfileFields {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub profile_picture: Option<String>,

    pub bio: Option<String>,
    pub headline: Option<String>,
    pub skills: Option<Vec<String>>,
    pub experience_level: Option<String>,
    pub current_position: Option<String>,
    pub company: Option<String>,

    pub highest_degree: Option<String>,
    pub institution: Option<String>,
    pub field_of_study: Option<String>,
    pub graduation_year: Option<i32>,

    pub transcript: Option<String>,
    pub statement_of_purpose: Option<String>,
    pub resume_url: Option<String>,
    pub portfolio_url: Option<String>,

    pub preferred_roles: Option<Vec<String>>,
    pub work_mode: Option<String>,
    pub salary_expectation: Option<String>,
    pub location_preference: Option<String>,
}

/// A stored talent profile, one per user.
///
/// `completeness` and `missing_fields` are derived; they are refreshed by the
/// completeness engine before every save and never taken from caller input.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct TalentProfile {
    pub id: String,
    pub user_id: String,

    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub profile_picture: Option<String>,

    pub bio: Option<String>,
    pub headline: Option<String>,
    pub skills: Option<Vec<String>>,
    pub experience_level: Option<String>,
    pub current_position: Option<String>,
    pub company: Option<String>,

    pub highest_degree: Option<String>,
    pub institution: Option<String>,
    pub field_of_study: Option<String>,
    pub graduation_year: Option<i32>,

    pub transcript: Option<String>,
    pub statement_of_purpose: Option<String>,
    pub resume_url: Option<String>,
    pub portfolio_url: Option<String>,

    pub preferred_roles: Option<Vec<String>>,
    pub work_mode: Option<String>,
    pub salary_expectation: Option<String>,
    pub location_preference: Option<String>,

    pub completeness: i32,
    pub missing_fields: Vec<String>,
    pub profile_visible: bool,

    /// Set by the profile store on first save.
    pub created_at: Option<DateTime<Utc>>,
    /// Set by the profile store on every save.
    pub updated_at: Option<DateTime<Utc>>,
}

impl TalentProfile {
    /// An empty, visible profile for `user_id` that has not been persisted yet.
    pub fn new(id: String, user_id: String) -> Self {
        Self {
            id,
            user_id,
            first_name: None,
            last_name: None,
            phone: None,
            location: None,
            profile_picture: None,
            bio: None,
            headline: None,
            skills: None,
            experience_level: None,
            current_position: None,
            company: None,
            highest_degree: None,
            institution: None,
            field_of_study: None,
            graduation_year: None,
            transcript: None,
            statement_of_purpose: None,
            resume_url: None,
            portfolio_url: None,
            preferred_roles: None,
            work_mode: None,
            salary_expectation: None,
            location_preference: None,
            completeness: 0,
            missing_fields: Vec::new(),
            profile_visible: true,
            created_at: None,
            updated_at: None,
        }
    }

    /// Overwrites every writable field with the incoming values, absent ones included.
    pub fn replace_fields(&mut self, fields: ProfileFields) {
        self.first_name = fields.first_name;
        self.last_name = fields.last_name;
        self.phone = fields.phone;
        self.location = fields.location;
        self.profile_picture = fields.profile_picture;

        self.bio = fields.bio;
        self.headline = fields.headline;
        self.skills = fields.skills;
        self.experience_level = fields.experience_level;
        self.current_position = fields.current_position;
        self.company = fields.company;

        self.highest_degree = fields.highest_degree;
        self.institution = fields.institution;
        self.field_of_study = fields.field_of_study;
        self.graduation_year = fields.graduation_year;

        self.transcript = fields.transcript;
        self.statement_of_purpose = fields.statement_of_purpose;
        self.resume_url = fields.resume_url;
        self.portfolio_url = fields.portfolio_url;

        self.preferred_roles = fields.preferred_roles;
        self.work_mode = fields.work_mode;
        self.salary_expectation = fields.salary_expectation;
        self.location_preference = fields.location_preference;
    }
}

/// What `GET /api/profile/talent/me` returns: the user's account state plus
/// either their stored profile or a "not started" placeholder.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfileSummary {
    pub status: String,
    pub message: String,

    pub email: String,
    pub verified: bool,

    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub profile_picture: Option<String>,

    pub bio: Option<String>,
    pub headline: Option<String>,
    pub skills: Option<Vec<String>>,
    pub experience_level: Option<String>,
    pub current_position: Option<String>,
    pub company: Option<String>,

    pub highest_degree: Option<String>,
    pub institution: Option<String>,
    pub field_of_study: Option<String>,
    pub graduation_year: Option<i32>,

    pub transcript: Option<String>,
    pub statement_of_purpose: Option<String>,
    pub resume_url: Option<String>,
    pub portfolio_url: Option<String>,

    pub preferred_roles: Option<Vec<String>>,
    pub work_mode: Option<String>,
    pub salary_expectation: Option<String>,
    pub location_preference: Option<String>,

    pub completeness: i32,
    pub missing_fields: Vec<String>,
    pub profile_visible: bool,
}

impl ProfileSummary {
    /// Copies every stored field of `profile` into a summary for an account.
    pub fn from_profile(
        profile: TalentProfile,
        email: String,
        verified: bool,
        message: &str,
    ) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
            email,
            verified,
            first_name: profile.first_name,
            last_name: profile.last_name,
            phone: profile.phone,
            location: profile.location,
            profile_picture: profile.profile_picture,
            bio: profile.bio,
            headline: profile.headline,
            skills: profile.skills,
            experience_level: profile.experience_level,
            current_position: profile.current_position,
            company: profile.company,
            highest_degree: profile.highest_degree,
            institution: profile.institution,
            field_of_study: profile.field_of_study,
            graduation_year: profile.graduation_year,
            transcript: profile.transcript,
            statement_of_purpose: profile.statement_of_purpose,
            resume_url: profile.resume_url,
            portfolio_url: profile.portfolio_url,
            preferred_roles: profile.preferred_roles,
            work_mode: profile.work_mode,
            salary_expectation: profile.salary_expectation,
            location_preference: profile.location_preference,
            completeness: profile.completeness,
            missing_fields: profile.missing_fields,
            profile_visible: profile.profile_visible,
        }
    }
}

/// Body returned after a successful profile write.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileUpdateResponse {
    pub status: String,
    pub message: String,
    pub completeness: i32,
}
