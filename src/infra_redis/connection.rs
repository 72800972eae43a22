use crate::logger::*;
use redis::aio::ConnectionManager;

/// The single long-lived connection shared by the Redis-backed stores.
/// Opened by the composition root at startup and released on shutdown.
#[derive(Clone)]
pub struct RedisConnection {
    manager: ConnectionManager,
}

impl RedisConnection {
    pub async fn open(url: &str) -> redis::RedisResult<Self> {
        let client = redis::Client::open(url)?;
        let mut manager = client.get_connection_manager().await?;
        let pong: String = redis::cmd("PING").query_async(&mut manager).await?;
        info!(%pong, "redis connection established");
        Ok(Self { manager })
    }

    pub fn manager(&self) -> ConnectionManager {
        self.manager.clone()
    }
}
