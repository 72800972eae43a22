use crate::domain_model::{CookieJar, Email};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fixed lifetime of a stored session. Used both for the `expires` field and for
/// the store TTL, so the two always agree at creation.
pub const SESSION_LIFETIME: Duration = Duration::from_secs(40 * 60);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub email: Email,
    pub expires: DateTime<Utc>,
    pub jar: CookieJar,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionCodecError {
    #[error("session payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("session payload is not valid json: {0}")]
    Json(#[from] serde_json::Error),
}

impl Session {
    /// Creates a session expiring one `SESSION_LIFETIME` after `now`. The expiry is never extended.
    pub fn new(email: Email, jar: CookieJar, now: DateTime<Utc>) -> Self {
        Self {
            email,
            expires: now + SESSION_LIFETIME,
            jar,
        }
    }

    /// base64(json) as written to the store.
    pub fn encode(&self) -> Result<String, SessionCodecError> {
        let json = serde_json::to_vec(self)?;
        Ok(STANDARD.encode(json))
    }

    pub fn decode(payload: &str) -> Result<Self, SessionCodecError> {
        let json = STANDARD.decode(payload.trim())?;
        Ok(serde_json::from_slice(&json)?)
    }
}
