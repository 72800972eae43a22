use crate::application_port::BrokerError;
use crate::domain_model::*;
use crate::logger::*;
use chrono::{DateTime, TimeDelta, Utc};
use reqwest::Url;
use reqwest::cookie::{Cookie, Jar};
use std::sync::Arc;
use std::time::Duration;

/// Upper bound on a cookie's lifetime; longer `Max-Age` values are clamped to it.
pub const MAX_COOKIE_AGE: Duration = Duration::from_secs(400 * 24 * 60 * 60);

fn expiry_after(now: DateTime<Utc>, max_age: Duration) -> Option<DateTime<Utc>> {
    TimeDelta::from_std(max_age.min(MAX_COOKIE_AGE))
        .ok()
        .and_then(|age| now.checked_add_signed(age))
}

pub fn stored_cookie(cookie: &Cookie<'_>, now: DateTime<Utc>) -> StoredCookie {
    let expires = match cookie.max_age() {
        Some(max_age) => expiry_after(now, max_age),
        None => cookie.expires().map(DateTime::<Utc>::from),
    };
    StoredCookie {
        name: cookie.name().to_string(),
        value: cookie.value().to_string(),
        domain: cookie.domain().map(str::to_string),
        path: cookie.path().map(str::to_string),
        secure: cookie.secure(),
        http_only: cookie.http_only(),
        expires,
    }
}

/// Rebuilds a reqwest cookie store holding the same cookies as `jar`.
pub fn to_reqwest_jar(jar: &CookieJar) -> Result<Arc<Jar>, BrokerError> {
    let origin: Url = jar
        .origin
        .parse()
        .map_err(|e| BrokerError::Serialization(format!("invalid cookie origin: {}", e)))?;
    let store = Jar::default();

    for cookie in &jar.cookies {
        let mut url = origin.clone();
        if let Some(domain) = &cookie.domain {
            if url.set_host(Some(domain.trim_start_matches('.'))).is_err() {
                warn!(cookie = %cookie.name, %domain, "skipping cookie with unusable domain");
                continue;
            }
        }
        url.set_path(cookie.path.as_deref().unwrap_or("/"));
        store.add_cookie_str(&cookie.to_set_cookie(), &url);
    }

    Ok(Arc::new(store))
}

/// An HTTP client that sends the session's cookies with every request.
pub fn bound_client(jar: &CookieJar) -> Result<reqwest::Client, BrokerError> {
    let store = to_reqwest_jar(jar)?;
    reqwest::Client::builder()
        .cookie_provider(store)
        .build()
        .map_err(|e| BrokerError::Transport(e.to_string()))
}
