mod login_gateway_fake;
mod memory_kv_store;

pub use login_gateway_fake::*;
pub use memory_kv_store::*;
