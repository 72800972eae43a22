use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_port::*;
use crate::infra_http::*;
use crate::infra_memory::*;
use crate::infra_redis::*;
use crate::logger::*;
use crate::settings::Settings;
use std::future::Future;
use std::sync::Arc;

/// Composition root. Owns the backing store connection for the life of the process.
pub struct Server {
    broker: Arc<dyn BrokerService>,
    connection: Option<RedisConnection>,
}

impl Server {
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let (sessions, failed_logins, connection): (
            Arc<dyn SessionStore>,
            Arc<dyn FailedLoginTracker>,
            Option<RedisConnection>,
        ) = match settings.store.backend.as_str() {
            "memory" => {
                let store = Arc::new(MemoryKvStore::new());
                let sessions: Arc<dyn SessionStore> = store.clone();
                let failed_logins: Arc<dyn FailedLoginTracker> = store;
                (sessions, failed_logins, None)
            }
            "redis" => {
                let connection = RedisConnection::open(&settings.store.url).await?;
                let sessions: Arc<dyn SessionStore> = Arc::new(RedisSessionStore::new(
                    connection.manager(),
                    ACCOUNT_KEY_PREFIX,
                ));
                let failed_logins: Arc<dyn FailedLoginTracker> = Arc::new(
                    RedisFailedLoginTracker::new(connection.manager(), FAILED_KEY_PREFIX),
                );
                (sessions, failed_logins, Some(connection))
            }
            other => return Err(anyhow::anyhow!("Unknown store backend: {}", other)),
        };

        let gateway: Arc<dyn LoginGateway> = match settings.gateway.backend.as_str() {
            "fake" => Arc::new(FakeLoginGateway::accepting()),
            "real" => Arc::new(HttpLoginGateway::new(settings.gateway.base_url.clone())?),
            other => return Err(anyhow::anyhow!("Unknown gateway backend: {}", other)),
        };

        let broker: Arc<dyn BrokerService> = Arc::new(RealBrokerService::new(
            Arc::new(Sha256CredentialHasher),
            failed_logins,
            sessions,
            gateway,
            Arc::new(TracingLoginObserver),
        ));

        info!(
            store = %settings.store.backend,
            gateway = %settings.gateway.backend,
            "session broker started"
        );

        Ok(Self { broker, connection })
    }

    /// Builds the server once `settings` resolves, for configuration that is
    /// only available asynchronously.
    pub async fn from_factory<F>(settings: F) -> anyhow::Result<Self>
    where
        F: Future<Output = anyhow::Result<Settings>>,
    {
        let settings = settings.await?;
        Self::try_new(&settings).await
    }

    pub fn broker(&self) -> Arc<dyn BrokerService> {
        self.broker.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Broker handles from `broker()` that are still alive. The stores inside them
    /// share the connection, so it only closes once these are dropped too.
    pub fn outstanding_broker_handles(&self) -> usize {
        Arc::strong_count(&self.broker) - 1
    }

    /// Drops the server's own connection handle. Consumes the server, so it runs at most
    /// once; dropping the server without calling it does the same. Callers should drop
    /// the handles they took from `broker()` first.
    pub async fn shutdown(self) {
        info!("session broker shutting down...");
        let outstanding = self.outstanding_broker_handles();
        let Self { broker, connection } = self;
        drop(broker);
        let Some(connection) = connection else {
            return;
        };
        drop(connection);
        if outstanding == 0 {
            info!("redis connection released");
        } else {
            warn!(
                outstanding,
                "redis connection stays open until remaining broker handles are dropped"
            );
        }
    }
}
