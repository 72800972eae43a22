use crate::domain_model::*;
use crate::domain_port::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Offline stand-in for the provider. Accepts every login unless configured to
/// reject, and hands back a single `fake_session` cookie.
#[derive(Debug)]
pub struct FakeLoginGateway {
    authcode: i64,
    message: String,
    latency: Duration,
    calls: AtomicUsize,
}

impl FakeLoginGateway {
    pub fn accepting() -> Self {
        Self {
            authcode: 1,
            message: String::new(),
            latency: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn rejecting(message: impl Into<String>) -> Self {
        Self {
            authcode: 0,
            message: message.into(),
            ..Self::accepting()
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of `authenticate` calls seen so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl LoginGateway for FakeLoginGateway {
    async fn authenticate(
        &self,
        email: &Email,
        _hashed_password: &str,
    ) -> Result<GatewayResponse, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let mut jar = CookieJar::new("https://members.fake.invalid");
        if self.authcode != 0 {
            jar.insert(StoredCookie {
                name: "fake_session".to_string(),
                value: email.to_string(),
                domain: None,
                path: Some("/".to_string()),
                secure: true,
                http_only: true,
                expires: None,
            });
        }
        Ok(GatewayResponse {
            authcode: self.authcode,
            message: self.message.clone(),
            jar,
        })
    }
}
