use crate::domain_model::*;
use crate::domain_port::*;
use crate::infra_http::stored_cookie;
use crate::logger::*;
use chrono::Utc;
use serde::{Deserialize, Serialize};

pub const DEFAULT_GATEWAY_BASE_URL: &str = "https://members-ng.iracing.com";

#[derive(Debug, Serialize)]
struct AuthRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    authcode: i64,
    #[serde(default)]
    message: Option<String>,
}

/// Talks to the provider's `POST /auth` endpoint.
pub struct HttpLoginGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLoginGateway {
    pub fn new(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn auth_url(&self) -> String {
        format!("{}/auth", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait::async_trait]
impl LoginGateway for HttpLoginGateway {
    async fn authenticate(
        &self,
        email: &Email,
        hashed_password: &str,
    ) -> Result<GatewayResponse, GatewayError> {
        let payload = AuthRequest {
            email: email.as_str(),
            password: hashed_password,
        };
        let response = self
            .client
            .post(self.auth_url())
            .json(&payload)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Transport(format!(
                "auth endpoint answered {}",
                status
            )));
        }

        // Cookies must be taken before the body consumes the response.
        let now = Utc::now();
        let mut jar = CookieJar::new(response.url().origin().ascii_serialization());
        for cookie in response.cookies() {
            jar.insert(stored_cookie(&cookie, now));
        }
        debug!(%email, cookies = jar.cookies.len(), "auth response received");

        let body: AuthResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))?;

        Ok(GatewayResponse {
            authcode: body.authcode,
            message: body.message.unwrap_or_default(),
            jar,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn email() -> Email {
        Email::parse("driver@example.com").unwrap()
    }

    #[tokio::test]
    async fn successful_auth_captures_cookies() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth"))
            .and(body_json(json!({
                "email": "driver@example.com",
                "password": "b2YdRMTIiziQusHSkGC0vXYm9zr72DZSb8WCOcwOq4Q=",
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "authtoken_members=tok; Path=/; HttpOnly")
                    .set_body_json(json!({ "authcode": 12345, "message": "" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let gateway = HttpLoginGateway::new(server.uri()).unwrap();
        let response = gateway
            .authenticate(&email(), "b2YdRMTIiziQusHSkGC0vXYm9zr72DZSb8WCOcwOq4Q=")
            .await
            .unwrap();

        assert!(response.is_success());
        assert_eq!(response.jar.origin, server.uri());
        assert_eq!(response.jar.cookies.len(), 1);
        let cookie = &response.jar.cookies[0];
        assert_eq!(cookie.name, "authtoken_members");
        assert_eq!(cookie.value, "tok");
        assert!(cookie.http_only);
    }

    #[tokio::test]
    async fn huge_max_age_does_not_break_login() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header(
                        "set-cookie",
                        "authtoken=tok; Path=/; Max-Age=9223372036854775807",
                    )
                    .set_body_json(json!({ "authcode": 1, "message": "" })),
            )
            .mount(&server)
            .await;

        let before = Utc::now();
        let gateway = HttpLoginGateway::new(server.uri()).unwrap();
        let response = gateway.authenticate(&email(), "x").await.unwrap();

        assert!(response.is_success());
        let expires = response.jar.cookies[0].expires.unwrap();
        assert!(expires >= before + crate::infra_http::MAX_COOKIE_AGE);
        assert!(expires <= Utc::now() + crate::infra_http::MAX_COOKIE_AGE);
    }

    #[tokio::test]
    async fn zero_authcode_is_reported_as_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "authcode": 0,
                "message": "Invalid email address or password. Please try again.",
            })))
            .mount(&server)
            .await;

        let gateway = HttpLoginGateway::new(server.uri()).unwrap();
        let response = gateway.authenticate(&email(), "x").await.unwrap();

        assert!(!response.is_success());
        assert_eq!(
            response.message,
            "Invalid email address or password. Please try again."
        );
        assert!(response.jar.is_empty());
    }

    #[tokio::test]
    async fn server_error_is_a_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let gateway = HttpLoginGateway::new(server.uri()).unwrap();
        let err = gateway.authenticate(&email(), "x").await.unwrap_err();
        assert!(matches!(err, GatewayError::Transport(_)));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let gateway = HttpLoginGateway::new(format!("{}/", server.uri())).unwrap();
        let err = gateway.authenticate(&email(), "x").await.unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)));
    }
}
