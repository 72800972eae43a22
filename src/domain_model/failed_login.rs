use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How long a rejected login blocks further attempts for the same account.
pub const LOCKOUT_DURATION: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedLoginRecord {
    pub failed_at: DateTime<Utc>,
    pub message: String,
}

impl FailedLoginRecord {
    pub fn new(message: impl Into<String>, failed_at: DateTime<Utc>) -> Self {
        Self {
            failed_at,
            message: message.into(),
        }
    }
}
