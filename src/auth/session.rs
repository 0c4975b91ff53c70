use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;

/// Active login sessions, keyed by user id and holding token ids (`jti`)
/// with their expiry (seconds since epoch).
///
/// Sessions live in process memory only; a restart logs everyone out.
/// Expired entries are dropped whenever a new session is opened.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, HashMap<String, usize>>>,
}

fn now() -> usize {
    Utc::now().timestamp().max(0) as usize
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self, user_id: &str, jti: &str, exp: usize) {
        let now = now();
        if let Ok(mut sessions) = self.sessions.write() {
            sessions.retain(|_, ids| {
                ids.retain(|_, expires| *expires > now);
                !ids.is_empty()
            });
            if exp > now {
                sessions
                    .entry(user_id.to_string())
                    .or_default()
                    .insert(jti.to_string(), exp);
            }
        }
    }

    pub fn is_active(&self, user_id: &str, jti: &str) -> bool {
        let now = now();
        self.sessions
            .read()
            .map(|sessions| {
                sessions
                    .get(user_id)
                    .and_then(|ids| ids.get(jti))
                    .is_some_and(|expires| *expires > now)
            })
            .unwrap_or(false)
    }

    /// Ends one session. Returns whether it was active.
    pub fn close(&self, user_id: &str, jti: &str) -> bool {
        let now = now();
        let Ok(mut sessions) = self.sessions.write() else {
            return false;
        };
        let Some(ids) = sessions.get_mut(user_id) else {
            return false;
        };
        let removed = ids.remove(jti).is_some_and(|expires| expires > now);
        if ids.is_empty() {
            sessions.remove(user_id);
        }
        removed
    }

    /// Ends every session of the user. Returns how many were active.
    pub fn close_all(&self, user_id: &str) -> usize {
        let now = now();
        self.sessions
            .write()
            .ok()
            .and_then(|mut sessions| sessions.remove(user_id))
            .map(|ids| ids.values().filter(|expires| **expires > now).count())
            .unwrap_or(0)
    }

    /// Number of sessions held, expired or not.
    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .map(|sessions| sessions.values().map(HashMap::len).sum())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
