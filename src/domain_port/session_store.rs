use crate::domain_model::*;

/// Key namespace of stored sessions: `accounts:<email>`.
pub const ACCOUNT_KEY_PREFIX: &str = "accounts";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store error: {0}")]
    Store(String),
    #[error("corrupt payload: {0}")]
    Codec(#[from] SessionCodecError),
    #[error("corrupt record: {0}")]
    Record(#[from] serde_json::Error),
}

/// Sole owner of the `accounts:` namespace. Entries expire through the store's own
/// TTL, which is authoritative over `Session::expires`.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// Writes the session under its email with a TTL of `SESSION_LIFETIME`.
    async fn put(&self, session: &Session) -> Result<(), StoreError>;

    /// `None` if the key never existed or has expired.
    async fn get(&self, email: &Email) -> Result<Option<Session>, StoreError>;

    /// Point-in-time snapshot of the live keys; may be stale as soon as it returns.
    async fn list_keys(&self) -> Result<Vec<Email>, StoreError>;
}
