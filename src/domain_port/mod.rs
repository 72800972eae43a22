// store

mod failed_login_tracker;
mod session_store;
mod store_key;

pub use failed_login_tracker::*;
pub use session_store::*;
pub use store_key::*;

// gateway

mod login_gateway;

pub use login_gateway::*;
