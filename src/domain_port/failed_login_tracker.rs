use crate::domain_model::*;
use crate::domain_port::StoreError;

/// Key namespace of lockout records: `failed:<email>`.
pub const FAILED_KEY_PREFIX: &str = "failed";

#[async_trait::async_trait]
pub trait FailedLoginTracker: Send + Sync {
    /// True while a lockout record for the email has not expired.
    async fn has_failed_login(&self, email: &Email) -> Result<bool, StoreError>;

    /// Writes a record expiring `LOCKOUT_DURATION` from now, replacing any previous one.
    async fn store_failed_login(&self, email: &Email, message: &str) -> Result<(), StoreError>;
}
