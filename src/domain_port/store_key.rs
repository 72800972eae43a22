use crate::domain_model::Email;

/// `<prefix>:<email>`, the key layout shared by every store backend.
pub fn store_key(prefix: &str, email: &Email) -> String {
    format!("{}:{}", prefix, email)
}

/// Inverse of `store_key`; `None` for keys outside the namespace.
pub fn email_from_store_key(prefix: &str, key: &str) -> Option<Email> {
    key.strip_prefix(prefix)?
        .strip_prefix(':')
        .and_then(Email::parse)
}
