//! Settings files and command line. `settings/dev.toml` runs fully offline
//! (memory store, fake provider); `settings/release.toml` targets Redis and the live provider.

mod cli;
pub use clap::{Parser, Subcommand};
pub use cli::*;

mod settings;
pub use settings::*;
