use crate::domain_model::*;
use crate::domain_port::*;
use chrono::Utc;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

/// `SET EX` seconds for lockout keys.
pub const LOCKOUT_TTL_SECS: u64 = LOCKOUT_DURATION.as_secs();

pub struct RedisFailedLoginTracker {
    conn: ConnectionManager,
    prefix: String,
}

impl RedisFailedLoginTracker {
    pub fn new(conn: ConnectionManager, prefix: impl Into<String>) -> Self {
        RedisFailedLoginTracker {
            conn,
            prefix: prefix.into(),
        }
    }

    fn key(&self, email: &Email) -> String {
        store_key(&self.prefix, email)
    }
}

#[async_trait::async_trait]
impl FailedLoginTracker for RedisFailedLoginTracker {
    async fn has_failed_login(&self, email: &Email) -> Result<bool, StoreError> {
        let key = self.key(email);
        let mut conn = self.conn.clone();
        let exists: bool = conn
            .exists(&key)
            .await
            .map_err(|e| StoreError::Store(e.to_string()))?;
        Ok(exists)
    }

    async fn store_failed_login(&self, email: &Email, message: &str) -> Result<(), StoreError> {
        let key = self.key(email);
        let payload = serde_json::to_string(&FailedLoginRecord::new(message, Utc::now()))?;
        let mut conn = self.conn.clone();
        let _: () = conn
            .set_ex(&key, payload, LOCKOUT_TTL_SECS)
            .await
            .map_err(|e| StoreError::Store(e.to_string()))?;
        Ok(())
    }
}
