use crate::domain_model::*;
use crate::domain_port::{GatewayError, StoreError};
use chrono::{DateTime, Utc};

#[derive(Debug, thiserror::Error)]
pub enum BrokerError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("serialization failure: {0}")]
    Serialization(String),
}

impl From<StoreError> for BrokerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Store(e) => BrokerError::Transport(e),
            StoreError::Codec(e) => BrokerError::Serialization(e.to_string()),
            StoreError::Record(e) => BrokerError::Serialization(e.to_string()),
        }
    }
}

impl From<GatewayError> for BrokerError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Transport(e) => BrokerError::Transport(e),
            GatewayError::Decode(e) => BrokerError::Transport(format!("bad auth response: {}", e)),
        }
    }
}

/// Result of a single `login` call. Lockouts and rejections are ordinary outcomes, not errors.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    /// A lockout record exists; no request was sent to the provider.
    LockedOut,
    /// The provider answered with auth code 0. A lockout record has been written.
    Rejected { message: String },
    /// A session has been stored.
    Authenticated { expires: DateTime<Utc> },
}

impl LoginOutcome {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, LoginOutcome::Authenticated { .. })
    }
}

/// A live session with an HTTP client carrying its cookies.
#[derive(Debug, Clone)]
pub struct AcquiredSession {
    pub client: reqwest::Client,
    pub email: Email,
    pub expires: DateTime<Utc>,
    pub jar: CookieJar,
}

/// Derives the password representation sent to the provider.
pub trait CredentialHasher: Send + Sync {
    fn hash_password(&self, email: &str, password: &str) -> String;
}

/// Hook invoked after every authentication attempt that reached the provider.
pub trait LoginObserver: Send + Sync {
    fn on_login_outcome(&self, email: &Email, success: bool, message: &str);
}

#[async_trait::async_trait]
pub trait BrokerService: Send + Sync {
    async fn login(&self, account: Account) -> Result<LoginOutcome, BrokerError>;

    /// A specific session when `email` is given, otherwise a random live one.
    /// `Ok(None)` means no session is available.
    async fn acquire_session(
        &self,
        email: Option<&str>,
    ) -> Result<Option<AcquiredSession>, BrokerError>;

    async fn has_failed_login(&self, email: &str) -> Result<bool, BrokerError>;
}
