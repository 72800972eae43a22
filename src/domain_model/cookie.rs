use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One cookie captured from an authenticated response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCookie {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub http_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
}

impl StoredCookie {
    /// Renders the cookie as a `Set-Cookie` header value.
    pub fn to_set_cookie(&self) -> String {
        let mut out = format!("{}={}", self.name, self.value);
        if let Some(domain) = &self.domain {
            out.push_str("; Domain=");
            out.push_str(domain);
        }
        out.push_str("; Path=");
        out.push_str(self.path.as_deref().unwrap_or("/"));
        if let Some(expires) = &self.expires {
            out.push_str("; Expires=");
            out.push_str(&expires.format("%a, %d %b %Y %H:%M:%S GMT").to_string());
        }
        if self.secure {
            out.push_str("; Secure");
        }
        if self.http_only {
            out.push_str("; HttpOnly");
        }
        out
    }
}

/// Serializable cookie state of an authenticated transport.
///
/// `origin` is the URL the cookies were received from; cookies without an
/// explicit domain are scoped to it when the jar is rebuilt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieJar {
    pub origin: String,
    pub cookies: Vec<StoredCookie>,
}

impl CookieJar {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            cookies: Vec::new(),
        }
    }

    /// Adds a cookie, replacing any existing one with the same name, domain and path.
    pub fn insert(&mut self, cookie: StoredCookie) {
        self.cookies.retain(|c| {
            !(c.name == cookie.name && c.domain == cookie.domain && c.path == cookie.path)
        });
        self.cookies.push(cookie);
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}
