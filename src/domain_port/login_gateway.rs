use crate::domain_model::*;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

#[derive(Debug, Clone)]
pub struct GatewayResponse {
    pub authcode: i64,
    pub message: String,
    /// Cookies set by the provider during the exchange.
    pub jar: CookieJar,
}

impl GatewayResponse {
    /// The provider signals rejection with an auth code of zero.
    pub fn is_success(&self) -> bool {
        self.authcode != 0
    }
}

#[async_trait::async_trait]
pub trait LoginGateway: Send + Sync {
    /// One request against the provider's auth endpoint. Holds no state between calls.
    async fn authenticate(
        &self,
        email: &Email,
        hashed_password: &str,
    ) -> Result<GatewayResponse, GatewayError>;
}
