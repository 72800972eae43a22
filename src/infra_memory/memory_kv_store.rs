use crate::domain_model::*;
use crate::domain_port::*;
use chrono::Utc;
use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

/// In-process key-value store with per-key TTL, laid out like the Redis backend
/// (`accounts:<email>`, `failed:<email>`). Expired entries are dropped lazily.
///
/// Uses the tokio clock so paused-time tests can advance past TTLs.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: DashMap<String, Entry>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_ex(&self, key: impl Into<String>, value: impl Into<String>, ttl: Duration) {
        self.entries.insert(
            key.into(),
            Entry {
                value: value.into(),
                expires_at: Instant::now() + ttl,
            },
        );
    }

    pub fn get_raw(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        self.entries.remove_if(key, |_, e| e.expires_at <= now);
        self.entries.get(key).map(|e| e.value.clone())
    }

    /// Remaining time to live, `None` when absent or expired.
    pub fn ttl(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        self.entries
            .get(key)
            .and_then(|e| e.expires_at.checked_duration_since(now))
            .filter(|d| !d.is_zero())
    }

    /// Live keys starting with `prefix`.
    pub fn keys(&self, prefix: &str) -> Vec<String> {
        let now = Instant::now();
        self.entries.retain(|_, e| e.expires_at > now);
        self.entries
            .iter()
            .filter(|e| e.key().starts_with(prefix))
            .map(|e| e.key().clone())
            .collect()
    }

    fn account_key(email: &Email) -> String {
        store_key(ACCOUNT_KEY_PREFIX, email)
    }

    fn failed_key(email: &Email) -> String {
        store_key(FAILED_KEY_PREFIX, email)
    }
}

#[async_trait::async_trait]
impl SessionStore for MemoryKvStore {
    async fn put(&self, session: &Session) -> Result<(), StoreError> {
        let payload = session.encode()?;
        self.set_ex(Self::account_key(&session.email), payload, SESSION_LIFETIME);
        Ok(())
    }

    async fn get(&self, email: &Email) -> Result<Option<Session>, StoreError> {
        match self.get_raw(&Self::account_key(email)) {
            Some(payload) => Ok(Some(Session::decode(&payload)?)),
            None => Ok(None),
        }
    }

    async fn list_keys(&self) -> Result<Vec<Email>, StoreError> {
        Ok(self
            .keys(&format!("{}:", ACCOUNT_KEY_PREFIX))
            .iter()
            .filter_map(|k| email_from_store_key(ACCOUNT_KEY_PREFIX, k))
            .collect())
    }
}

#[async_trait::async_trait]
impl FailedLoginTracker for MemoryKvStore {
    async fn has_failed_login(&self, email: &Email) -> Result<bool, StoreError> {
        Ok(self.get_raw(&Self::failed_key(email)).is_some())
    }

    async fn store_failed_login(&self, email: &Email, message: &str) -> Result<(), StoreError> {
        let record = FailedLoginRecord::new(message, Utc::now());
        let payload = serde_json::to_string(&record)?;
        self.set_ex(Self::failed_key(email), payload, LOCKOUT_DURATION);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(s: &str) -> Email {
        Email::parse(s).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn lockout_lasts_exactly_the_lockout_duration() {
        let store = MemoryKvStore::new();
        let a = email("a@x.com");

        assert!(!store.has_failed_login(&a).await.unwrap());
        store.store_failed_login(&a, "bad creds").await.unwrap();
        assert!(store.has_failed_login(&a).await.unwrap());

        tokio::time::advance(LOCKOUT_DURATION - Duration::from_secs(1)).await;
        assert!(store.has_failed_login(&a).await.unwrap());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(!store.has_failed_login(&a).await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn storing_again_restarts_the_lockout() {
        let store = MemoryKvStore::new();
        let a = email("a@x.com");

        store.store_failed_login(&a, "first").await.unwrap();
        tokio::time::advance(Duration::from_secs(60 * 60)).await;
        store.store_failed_login(&a, "second").await.unwrap();

        let raw = store.get_raw("failed:a@x.com").unwrap();
        let record: FailedLoginRecord = serde_json::from_str(&raw).unwrap();
        assert_eq!(record.message, "second");
        assert_eq!(store.ttl("failed:a@x.com"), Some(LOCKOUT_DURATION));
    }

    #[tokio::test(start_paused = true)]
    async fn session_expires_after_lifetime() {
        let store = MemoryKvStore::new();
        let a = email("a@x.com");
        let session = Session::new(a.clone(), CookieJar::new("https://example.com"), Utc::now());

        store.put(&session).await.unwrap();
        assert_eq!(store.get(&a).await.unwrap(), Some(session));
        assert_eq!(store.list_keys().await.unwrap(), vec![a.clone()]);

        tokio::time::advance(SESSION_LIFETIME).await;
        assert_eq!(store.get(&a).await.unwrap(), None);
        assert!(store.list_keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_keys_ignores_other_namespaces() {
        let store = MemoryKvStore::new();
        store
            .store_failed_login(&email("locked@x.com"), "nope")
            .await
            .unwrap();
        store
            .put(&Session::new(email("b@x.com"), CookieJar::default(), Utc::now()))
            .await
            .unwrap();

        assert_eq!(store.list_keys().await.unwrap(), vec![email("b@x.com")]);
    }

    #[tokio::test]
    async fn corrupt_session_payload_is_an_error() {
        let store = MemoryKvStore::new();
        store.set_ex("accounts:a@x.com", "not-a-session", SESSION_LIFETIME);

        let err = store.get(&email("a@x.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::Codec(_)));
    }
}
