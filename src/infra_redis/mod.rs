mod connection;
mod failed_login_tracker_redis;
mod session_store_redis;

pub use connection::*;
pub use failed_login_tracker_redis::*;
pub use session_store_redis::*;
