mod account_selector;
mod broker_service_impl;
mod credential_hasher_sha256;
mod login_observer_tracing;

pub use account_selector::*;
pub use broker_service_impl::*;
pub use credential_hasher_sha256::*;
pub use login_observer_tracing::*;
