mod account;
mod cookie;
mod email;
mod failed_login;
mod session;

pub use account::*;
pub use cookie::*;
pub use email::*;
pub use failed_login::*;
pub use session::*;
