use super::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(about = "Pooled sessions for the members site")]
pub struct Cli {
    #[arg(long)]
    pub settings: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and store the session. The password is read from `SESSION_BROKER_PASSWORD`.
    Login {
        #[arg(long)]
        email: String,
    },
    /// Fetch a stored session, random unless `--email` is given.
    Acquire {
        #[arg(long)]
        email: Option<String>,
    },
    /// Report whether an account is locked out.
    Status {
        #[arg(long)]
        email: String,
    },
}
