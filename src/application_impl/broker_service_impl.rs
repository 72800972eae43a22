use crate::application_impl::AccountSelector;
use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use crate::infra_http::bound_client;
use crate::logger::*;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// A random pick can expire between enumeration and fetch; draw again this many times in total.
const RANDOM_PICK_ATTEMPTS: usize = 2;

type LoginLocks = DashMap<Email, Arc<Mutex<()>>>;

/// A caller's share of one account's login lock. Dropping it, whether the login
/// finished or its future was abandoned, removes the map entry once nobody else holds it.
struct LoginLockHandle<'a> {
    locks: &'a LoginLocks,
    email: Email,
    lock: Arc<Mutex<()>>,
}

impl<'a> LoginLockHandle<'a> {
    fn new(locks: &'a LoginLocks, email: &Email) -> Self {
        let lock = locks.entry(email.clone()).or_default().value().clone();
        Self {
            locks,
            email: email.clone(),
            lock,
        }
    }
}

impl Drop for LoginLockHandle<'_> {
    fn drop(&mut self) {
        // One reference in the map, one here.
        self.locks.remove_if(&self.email, |_, lock| {
            Arc::ptr_eq(lock, &self.lock) && Arc::strong_count(lock) == 2
        });
    }
}

pub struct RealBrokerService {
    credential_hasher: Arc<dyn CredentialHasher>,
    failed_logins: Arc<dyn FailedLoginTracker>,
    sessions: Arc<dyn SessionStore>,
    selector: AccountSelector,
    gateway: Arc<dyn LoginGateway>,
    observer: Arc<dyn LoginObserver>,
    login_locks: LoginLocks,
}

impl RealBrokerService {
    pub fn new(
        credential_hasher: Arc<dyn CredentialHasher>,
        failed_logins: Arc<dyn FailedLoginTracker>,
        sessions: Arc<dyn SessionStore>,
        gateway: Arc<dyn LoginGateway>,
        observer: Arc<dyn LoginObserver>,
    ) -> Self {
        Self {
            credential_hasher,
            failed_logins,
            selector: AccountSelector::new(sessions.clone()),
            sessions,
            gateway,
            observer,
            login_locks: DashMap::new(),
        }
    }

    fn parse_email(raw: &str) -> Result<Email, BrokerError> {
        Email::parse(raw).ok_or_else(|| BrokerError::InvalidInput("email is empty".to_string()))
    }

    /// Lockout check, authentication and persistence for one account.
    /// Callers hold the account's login lock.
    async fn login_exclusive(
        &self,
        email: &Email,
        password: &str,
    ) -> Result<LoginOutcome, BrokerError> {
        if self.failed_logins.has_failed_login(email).await? {
            error!("Failed login attempt for {} detected!", email);
            return Ok(LoginOutcome::LockedOut);
        }

        let hashed = self
            .credential_hasher
            .hash_password(email.as_str(), password);
        let response = self.gateway.authenticate(email, &hashed).await?;
        let success = response.is_success();
        let message = response.message;

        let outcome = if success {
            let session = Session::new(email.clone(), response.jar, Utc::now());
            self.sessions.put(&session).await?;
            debug!(%email, expires = %session.expires, "session stored");
            LoginOutcome::Authenticated {
                expires: session.expires,
            }
        } else {
            error!("Store failed login attempt for {}", email);
            self.failed_logins
                .store_failed_login(email, &message)
                .await?;
            LoginOutcome::Rejected {
                message: message.clone(),
            }
        };

        self.observer.on_login_outcome(email, success, &message);
        Ok(outcome)
    }

    async fn load(&self, email: &Email) -> Result<Option<AcquiredSession>, BrokerError> {
        let Some(session) = self.sessions.get(email).await? else {
            return Ok(None);
        };
        let client = bound_client(&session.jar)?;
        Ok(Some(AcquiredSession {
            client,
            email: session.email,
            expires: session.expires,
            jar: session.jar,
        }))
    }
}

#[async_trait::async_trait]
impl BrokerService for RealBrokerService {
    async fn login(&self, account: Account) -> Result<LoginOutcome, BrokerError> {
        let email = Self::parse_email(&account.email)?;

        let handle = LoginLockHandle::new(&self.login_locks, &email);
        let _held = handle.lock.lock().await;
        let outcome = self.login_exclusive(&email, &account.password).await;
        outcome
    }

    async fn acquire_session(
        &self,
        email: Option<&str>,
    ) -> Result<Option<AcquiredSession>, BrokerError> {
        if let Some(raw) = email {
            let email = Self::parse_email(raw)?;
            let Some(key) = self.selector.select(Some(&email)).await? else {
                return Ok(None);
            };
            return self.load(&key).await;
        }

        for attempt in 1..=RANDOM_PICK_ATTEMPTS {
            let Some(key) = self.selector.select(None).await? else {
                return Ok(None);
            };
            if let Some(session) = self.load(&key).await? {
                return Ok(Some(session));
            }
            debug!(%key, attempt, "picked session expired before it could be read");
        }
        Ok(None)
    }

    async fn has_failed_login(&self, email: &str) -> Result<bool, BrokerError> {
        let email = Self::parse_email(email)?;
        Ok(self.failed_logins.has_failed_login(&email).await?)
    }
}
