use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical account identifier. Emails are compared case-insensitively, so the
/// stored form is trimmed and lowercased.
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Returns `None` when nothing is left after trimming.
    pub fn parse(raw: &str) -> Option<Self> {
        let canonical = raw.trim().to_lowercase();
        if canonical.is_empty() {
            None
        } else {
            Some(Self(canonical))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_lowercases_and_trims() {
        let email = Email::parse("  Driver@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "driver@example.com");
        assert_eq!(email, Email::parse("driver@example.com").unwrap());
    }

    #[test]
    fn parse_rejects_blank() {
        assert!(Email::parse("").is_none());
        assert!(Email::parse("   ").is_none());
    }
}
