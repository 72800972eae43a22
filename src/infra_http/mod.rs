mod cookie_jar_reqwest;
mod login_gateway_http;

pub use cookie_jar_reqwest::*;
pub use login_gateway_http::*;
