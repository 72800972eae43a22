//! Process-wide `tracing` subscriber with a filter that can be swapped once settings are read.

mod logger;
pub use logger::*;

pub use tracing::{debug, error, info, trace, warn};
