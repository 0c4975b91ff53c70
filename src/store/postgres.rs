use async_trait::async_trait;
use sqlx::PgPool;

use super::{ProfileStore, StoreError, StoreResult, UserDirectory};
use crate::models::{TalentProfile, User};

const USER_COLUMNS: &str =
    "id, email, password_hash, verified, verification_token, verification_expires_at, created_at";

const PROFILE_COLUMNS: &str = "id, user_id, first_name, last_name, phone, location, profile_picture, \
     bio, headline, skills, experience_level, current_position, company, \
     highest_degree, institution, field_of_study, graduation_year, \
     transcript, statement_of_purpose, resume_url, portfolio_url, \
     preferred_roles, work_mode, salary_expectation, location_preference, \
     completeness, missing_fields, profile_visible, created_at, updated_at";

/// PostgreSQL-backed user directory and profile store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the bundled schema. Safe to call on every start.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

#[async_trait]
impl UserDirectory for PgStore {
    async fn find_by_id(&self, user_id: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_verification_token(&self, token: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE verification_token = $1",
            USER_COLUMNS
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn insert(&self, user: User) -> StoreResult<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users ({cols}) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {cols}",
            cols = USER_COLUMNS
        ))
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.verified)
        .bind(&user.verification_token)
        .bind(user.verification_expires_at)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn mark_verified(&self, user_id: &str) -> StoreResult<()> {
        let result = sqlx::query(
            "UPDATE users SET verified = TRUE, verification_token = NULL, verification_expires_at = NULL \
             WHERE id = $1",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::Backend(format!("no user with id {}", user_id)));
        }
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY created_at",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }
}

#[async_trait]
impl ProfileStore for PgStore {
    async fn find_by_user_id(&self, user_id: &str) -> StoreResult<Option<TalentProfile>> {
        let profile = sqlx::query_as::<_, TalentProfile>(&format!(
            "SELECT {} FROM talent_profiles WHERE user_id = $1",
            PROFILE_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    async fn save(&self, profile: TalentProfile) -> StoreResult<TalentProfile> {
        // Upsert keyed by user_id; created_at is only written on insert.
        let sql = format!(
            "INSERT INTO talent_profiles (
                id, user_id, first_name, last_name, phone, location, profile_picture,
                bio, headline, skills, experience_level, current_position, company,
                highest_degree, institution, field_of_study, graduation_year,
                transcript, statement_of_purpose, resume_url, portfolio_url,
                preferred_roles, work_mode, salary_expectation, location_preference,
                completeness, missing_fields, profile_visible
             ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28
             )
             ON CONFLICT (user_id) DO UPDATE SET
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                phone = EXCLUDED.phone,
                location = EXCLUDED.location,
                profile_picture = EXCLUDED.profile_picture,
                bio = EXCLUDED.bio,
                headline = EXCLUDED.headline,
                skills = EXCLUDED.skills,
                experience_level = EXCLUDED.experience_level,
                current_position = EXCLUDED.current_position,
                company = EXCLUDED.company,
                highest_degree = EXCLUDED.highest_degree,
                institution = EXCLUDED.institution,
                field_of_study = EXCLUDED.field_of_study,
                graduation_year = EXCLUDED.graduation_year,
                transcript = EXCLUDED.transcript,
                statement_of_purpose = EXCLUDED.statement_of_purpose,
                resume_url = EXCLUDED.resume_url,
                portfolio_url = EXCLUDED.portfolio_url,
                preferred_roles = EXCLUDED.preferred_roles,
                work_mode = EXCLUDED.work_mode,
                salary_expectation = EXCLUDED.salary_expectation,
                location_preference = EXCLUDED.location_preference,
                completeness = EXCLUDED.completeness,
                missing_fields = EXCLUDED.missing_fields,
                profile_visible = EXCLUDED.profile_visible,
                updated_at = NOW()
             RETURNING {}",
            PROFILE_COLUMNS
        );

        let stored = sqlx::query_as::<_, TalentProfile>(&sql)
            .bind(&profile.id)
            .bind(&profile.user_id)
            .bind(&profile.first_name)
            .bind(&profile.last_name)
            .bind(&profile.phone)
            .bind(&profile.location)
            .bind(&profile.profile_picture)
            .bind(&profile.bio)
            .bind(&profile.headline)
            .bind(&profile.skills)
            .bind(&profile.experience_level)
            .bind(&profile.current_position)
            .bind(&profile.company)
            .bind(&profile.highest_degree)
            .bind(&profile.institution)
            .bind(&profile.field_of_study)
            .bind(profile.graduation_year)
            .bind(&profile.transcript)
            .bind(&profile.statement_of_purpose)
            .bind(&profile.resume_url)
            .bind(&profile.portfolio_url)
            .bind(&profile.preferred_roles)
            .bind(&profile.work_mode)
            .bind(&profile.salary_expectation)
            .bind(&profile.location_preference)
            .bind(profile.completeness)
            .bind(&profile.missing_fields)
            .bind(profile.profile_visible)
            .fetch_one(&self.pool)
            .await?;
        Ok(stored)
    }
}
