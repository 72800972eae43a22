use crate::application_port::LoginObserver;
use crate::domain_model::Email;
use crate::logger::*;

/// Default login hook: one log line per authentication attempt.
#[derive(Debug, Default)]
pub struct TracingLoginObserver;

impl LoginObserver for TracingLoginObserver {
    fn on_login_outcome(&self, email: &Email, success: bool, message: &str) {
        if success {
            info!("Login attempt for {} was successful", email);
        } else {
            warn!(%message, "Login attempt for {} was unsuccessful", email);
        }
    }
}
