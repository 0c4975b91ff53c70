use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{ProfileStore, StoreError, StoreResult, UserDirectory};
use crate::models::{TalentProfile, User};

/// In-process implementation of both stores. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, User>>,
    profiles: RwLock<HashMap<String, TalentProfile>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn find_by_id(&self, user_id: &str) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|user| user.email == email).cloned())
    }

    async fn find_by_verification_token(&self, token: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|user| user.verification_token.as_deref() == Some(token))
            .cloned())
    }

    async fn insert(&self, user: User) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|existing| existing.email == user.email) {
            return Err(StoreError::Conflict(format!(
                "email {} already registered",
                user.email
            )));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn mark_verified(&self, user_id: &str) -> StoreResult<()> {
        let mut users = self.users.write().await;
        match users.get_mut(user_id) {
            Some(user) => {
                user.verified = true;
                user.verification_token = None;
                user.verification_expires_at = None;
                Ok(())
            }
            None => Err(StoreError::Backend(format!("no user with id {}", user_id))),
        }
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(users)
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn find_by_user_id(&self, user_id: &str) -> StoreResult<Option<TalentProfile>> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn save(&self, mut profile: TalentProfile) -> StoreResult<TalentProfile> {
        let now = Utc::now();
        let mut profiles = self.profiles.write().await;
        profile.created_at = profiles
            .get(&profile.user_id)
            .and_then(|existing| existing.created_at)
            .or(Some(now));
        profile.updated_at = Some(now);
        profiles.insert(profile.user_id.clone(), profile.clone());
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn user(email: &str) -> User {
        User::new_unverified(email.to_string(), "hash".to_string(), Duration::hours(1))
    }

    #[actix_rt::test]
    async fn test_insert_rejects_duplicate_email() {
        let store = MemoryStore::new();
        store.insert(user("dup@example.com")).await.unwrap();

        let result = store.insert(user("dup@example.com")).await;
        assert!(matches!(result, Err(StoreError::Conflict(_))));
    }

    #[actix_rt::test]
    async fn test_mark_verified_clears_token() {
        let store = MemoryStore::new();
        let created = store.insert(user("v@example.com")).await.unwrap();
        let token = created.verification_token.clone().unwrap();

        assert!(store.find_by_verification_token(&token).await.unwrap().is_some());
        store.mark_verified(&created.id).await.unwrap();

        let stored = store.find_by_id(&created.id).await.unwrap().unwrap();
        assert!(stored.verified);
        assert!(stored.verification_token.is_none());
        assert!(store.find_by_verification_token(&token).await.unwrap().is_none());
    }

    #[actix_rt::test]
    async fn test_mark_verified_unknown_user_fails() {
        let store = MemoryStore::new();
        let result = store.mark_verified("no-such-user").await;
        assert!(matches!(result, Err(StoreError::Backend(_))));
    }

    #[actix_rt::test]
    async fn test_save_keeps_created_at_and_bumps_updated_at() {
        let store = MemoryStore::new();
        let first = store
            .save(TalentProfile::new("p1".into(), "u1".into()))
            .await
            .unwrap();
        let second = store.save(first.clone()).await.unwrap();

        assert_eq!(first.created_at, second.created_at);
        assert!(second.updated_at >= first.updated_at);
        assert_eq!(
            store.find_by_user_id("u1").await.unwrap().unwrap().id,
            "p1"
        );
    }
}
