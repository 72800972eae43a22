use crate::domain_model::*;
use crate::domain_port::*;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

/// `SET EX` seconds for session keys.
pub const SESSION_TTL_SECS: u64 = SESSION_LIFETIME.as_secs();

pub struct RedisSessionStore {
    conn: ConnectionManager,
    prefix: String,
}

impl RedisSessionStore {
    pub fn new(conn: ConnectionManager, prefix: impl Into<String>) -> Self {
        RedisSessionStore {
            conn,
            prefix: prefix.into(),
        }
    }

    fn key(&self, email: &Email) -> String {
        store_key(&self.prefix, email)
    }
}

#[async_trait::async_trait]
impl SessionStore for RedisSessionStore {
    async fn put(&self, session: &Session) -> Result<(), StoreError> {
        let key = self.key(&session.email);
        let payload = session.encode()?;
        let mut conn = self.conn.clone();
        let _: () = conn
            .set_ex(&key, payload, SESSION_TTL_SECS)
            .await
            .map_err(|e| StoreError::Store(e.to_string()))?;
        Ok(())
    }

    async fn get(&self, email: &Email) -> Result<Option<Session>, StoreError> {
        let key = self.key(email);
        let mut conn = self.conn.clone();
        let payload: Option<String> = conn
            .get(&key)
            .await
            .map_err(|e| StoreError::Store(e.to_string()))?;
        match payload {
            Some(payload) => Ok(Some(Session::decode(&payload)?)),
            None => Ok(None),
        }
    }

    async fn list_keys(&self) -> Result<Vec<Email>, StoreError> {
        let pattern = format!("{}:*", self.prefix);
        let mut conn = self.conn.clone();
        let keys: Vec<String> = conn
            .keys(&pattern)
            .await
            .map_err(|e| StoreError::Store(e.to_string()))?;
        Ok(keys
            .iter()
            .filter_map(|k| email_from_store_key(&self.prefix, k))
            .collect())
    }
}
