//! Login sessions keyed by token digest.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use sha2::{Digest, Sha256};
use tracing::debug;
use uuid::Uuid;

/// Session lifetime used when none is configured.
pub const DEFAULT_SESSION_TTL_MINUTES: i64 = 720;

#[derive(Debug, Clone)]
struct Session {
    username: String,
    issued_at: DateTime<Utc>,
}

/// Issued login tokens.
///
/// Only the SHA-256 digest of each token is kept, mapped to the username
/// it was issued for. Tokens stop resolving once they are older than the
/// store's time-to-live; expired entries are dropped on the next `issue`
/// or on lookup.
#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<String, Session>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl(Duration::minutes(DEFAULT_SESSION_TTL_MINUTES))
    }
}

/// Hash a token for storage and lookup.
fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

impl SessionStore {
    /// Creates an empty session store with the default lifetime.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty session store whose tokens live for `ttl`.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    /// How long an issued token stays valid.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of stored sessions, expired ones included until pruned.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns true when no sessions are stored.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Issues a fresh token for `username`.
    pub fn issue(&self, username: &str) -> String {
        self.issue_at(username, Utc::now())
    }

    fn issue_at(&self, username: &str, now: DateTime<Utc>) -> String {
        self.prune_expired(now);
        let token = Uuid::new_v4().simple().to_string();
        self.sessions.insert(
            hash_token(&token),
            Session {
                username: username.to_string(),
                issued_at: now,
            },
        );
        token
    }

    /// Returns the username a token was issued for, if it has not expired.
    pub fn resolve(&self, token: &str) -> Option<String> {
        self.resolve_at(token, Utc::now())
    }

    fn resolve_at(&self, token: &str, now: DateTime<Utc>) -> Option<String> {
        let key = hash_token(token);
        let session = self.sessions.get(&key).map(|entry| entry.value().clone())?;
        if self.is_expired(&session, now) {
            self.sessions.remove(&key);
            debug!(username = %session.username, "Session expired");
            return None;
        }
        Some(session.username)
    }

    /// Invalidates a token. Returns false if it was unknown.
    pub fn revoke(&self, token: &str) -> bool {
        self.sessions.remove(&hash_token(token)).is_some()
    }

    fn is_expired(&self, session: &Session, now: DateTime<Utc>) -> bool {
        now - session.issued_at >= self.ttl
    }

    fn prune_expired(&self, now: DateTime<Utc>) {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| now - session.issued_at < self.ttl);
        let pruned = before.saturating_sub(self.sessions.len());
        if pruned > 0 {
            debug!(pruned, "Expired sessions removed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_resolve() {
        let sessions = SessionStore::new();
        let token = sessions.issue("hossein");
        assert_eq!(sessions.resolve(&token).as_deref(), Some("hossein"));
        assert_eq!(sessions.resolve("not-a-token"), None);
    }

    #[test]
    fn test_tokens_are_unique() {
        let sessions = SessionStore::new();
        assert_ne!(sessions.issue("hossein"), sessions.issue("hossein"));
    }

    #[test]
    fn test_revoke() {
        let sessions = SessionStore::new();
        let token = sessions.issue("masoud");
        assert!(sessions.revoke(&token));
        assert!(!sessions.revoke(&token));
        assert_eq!(sessions.resolve(&token), None);
    }

    #[test]
    fn test_raw_token_is_not_stored() {
        let sessions = SessionStore::new();
        let token = sessions.issue("masoud");
        assert!(!sessions.sessions.contains_key(&token));
        assert_eq!(hash_token(&token).len(), 64);
    }

    #[test]
    fn test_expired_token_no_longer_resolves() {
        let sessions = SessionStore::with_ttl(Duration::minutes(30));
        let issued = Utc::now();
        let token = sessions.issue_at("hossein", issued);

        let later = issued + Duration::minutes(29);
        assert_eq!(sessions.resolve_at(&token, later).as_deref(), Some("hossein"));

        let expired = issued + Duration::minutes(30);
        assert_eq!(sessions.resolve_at(&token, expired), None);
        assert!(sessions.is_empty());
    }

    #[test]
    fn test_issue_prunes_expired_sessions() {
        let sessions = SessionStore::with_ttl(Duration::minutes(30));
        let issued = Utc::now();
        for _ in 0..5 {
            sessions.issue_at("masoud", issued);
        }
        assert_eq!(sessions.len(), 5);

        let fresh = sessions.issue_at("hossein", issued + Duration::hours(1));
        assert_eq!(sessions.len(), 1);
        assert_eq!(
            sessions
                .resolve_at(&fresh, issued + Duration::hours(1))
                .as_deref(),
            Some("hossein")
        );
    }

    #[test]
    fn test_default_ttl() {
        assert_eq!(
            SessionStore::new().ttl(),
            Duration::minutes(DEFAULT_SESSION_TTL_MINUTES)
        );
    }
}
