use crate::application_port::CredentialHasher;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};

/// `base64(sha256(password + lowercase(email)))`.
///
/// Unsalted and deterministic: this is the exact derivation the provider's
/// auth endpoint expects, not a storage hash.
#[derive(Debug, Default)]
pub struct Sha256CredentialHasher;

impl CredentialHasher for Sha256CredentialHasher {
    fn hash_password(&self, email: &str, password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(password.as_bytes());
        hasher.update(email.to_lowercase().as_bytes());
        let digest = hasher.finalize();
        STANDARD.encode(digest.as_slice())
    }
}
