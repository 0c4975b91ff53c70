use chrono::Duration;
use dotenv::dotenv;
use pretty_assertions::assert_eq;
use sqlx::PgPool;
use talentforge::models::{TalentProfile, User};
use talentforge::profile::refresh_completeness;
use talentforge::store::{PgStore, ProfileStore, StoreError, UserDirectory};
use uuid::Uuid;

/// Connects to `DATABASE_URL` and applies migrations, or returns `None` when
/// no database is configured so the suite still runs without Postgres.
async fn connect() -> Option<PgStore> {
    dotenv().ok();
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping Postgres store tests");
        return None;
    };
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB");
    let store = PgStore::new(pool);
    store.run_migrations().await.expect("Failed to run migrations");
    Some(store)
}

fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, Uuid::new_v4())
}

fn new_user(prefix: &str) -> User {
    User::new_unverified(unique_email(prefix), "hash".into(), Duration::hours(1))
}

#[actix_rt::test]
async fn test_profile_upsert_round_trip() {
    let Some(store) = connect().await else {
        return;
    };
    let user = store.insert(new_user("profile")).await.unwrap();

    let mut profile = TalentProfile::new(Uuid::new_v4().to_string(), user.id.clone());
    profile.first_name = Some("Ada".into());
    profile.skills = Some(vec!["rust".into(), "sql".into()]);
    profile.graduation_year = Some(2021);
    refresh_completeness(&mut profile);

    let first = store.save(profile.clone()).await.unwrap();
    assert_eq!(first.id, profile.id);
    assert!(first.created_at.is_some());

    let loaded = store.find_by_user_id(&user.id).await.unwrap().unwrap();
    assert_eq!(loaded.first_name.as_deref(), Some("Ada"));
    assert_eq!(loaded.skills, Some(vec!["rust".to_string(), "sql".to_string()]));
    assert_eq!(loaded.graduation_year, Some(2021));
    assert_eq!(loaded.completeness, profile.completeness);
    assert_eq!(loaded.missing_fields, profile.missing_fields);
    assert!(loaded.profile_visible);

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    // A second save under a fresh id still lands on the same row.
    let mut replacement = TalentProfile::new(Uuid::new_v4().to_string(), user.id.clone());
    replacement.last_name = Some("Lovelace".into());
    refresh_completeness(&mut replacement);
    let second = store.save(replacement).await.unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at > first.updated_at);
    assert_eq!(second.first_name, None);
    assert_eq!(second.last_name.as_deref(), Some("Lovelace"));
}

#[actix_rt::test]
async fn test_missing_profile_is_none() {
    let Some(store) = connect().await else {
        return;
    };
    assert!(store.find_by_user_id("no-such-user").await.unwrap().is_none());
}

#[actix_rt::test]
async fn test_duplicate_email_is_a_conflict() {
    let Some(store) = connect().await else {
        return;
    };
    let user = store.insert(new_user("dup")).await.unwrap();

    let again = User::new_unverified(user.email.clone(), "other".into(), Duration::hours(1));
    let result = store.insert(again).await;
    assert!(matches!(result, Err(StoreError::Conflict(_))));
}

#[actix_rt::test]
async fn test_mark_verified_clears_token() {
    let Some(store) = connect().await else {
        return;
    };
    let user = store.insert(new_user("verify")).await.unwrap();
    let token = user.verification_token.clone().unwrap();

    let found = store.find_by_verification_token(&token).await.unwrap().unwrap();
    assert_eq!(found.id, user.id);

    store.mark_verified(&user.id).await.unwrap();

    let stored = store.find_by_email(&user.email).await.unwrap().unwrap();
    assert!(stored.verified);
    assert!(stored.verification_token.is_none());
    assert!(stored.verification_expires_at.is_none());
    assert!(store.find_by_verification_token(&token).await.unwrap().is_none());

    let result = store.mark_verified("no-such-user").await;
    assert!(matches!(result, Err(StoreError::Backend(_))));
}
