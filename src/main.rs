use session_broker::application_port::*;
use session_broker::domain_model::Account;
use session_broker::logger::*;
use session_broker::server::*;
use session_broker::settings::*;
use std::sync::Arc;
use tokio::signal;

const PASSWORD_ENV: &str = "SESSION_BROKER_PASSWORD";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logger = Logger::new_bootstrap();

    let project_settings = parse_settings(cli.settings.as_deref())?;
    info!(?project_settings);
    logger.reload_from_config(&LogConfig::from(&project_settings.log))?;

    let server = Server::try_new(&project_settings).await?;

    let result = tokio::select! {
        result = run(cli.command, server.broker()) => result,
        _ = signal::ctrl_c() => {
            warn!("interrupted");
            Ok(())
        }
    };

    let shutdown_timeout = std::time::Duration::from_secs(10);
    match tokio::time::timeout(shutdown_timeout, server.shutdown()).await {
        Ok(_) => info!("shutdown complete"),
        Err(_) => error!("shutdown timed out"),
    }

    result
}

async fn run(command: Command, broker: Arc<dyn BrokerService>) -> anyhow::Result<()> {
    match command {
        Command::Login { email } => {
            let password = std::env::var(PASSWORD_ENV)
                .map_err(|_| anyhow::anyhow!("{} is not set", PASSWORD_ENV))?;
            match broker.login(Account::new(email.clone(), password)).await? {
                LoginOutcome::Authenticated { expires } => {
                    println!("{}: session stored, expires {}", email, expires)
                }
                LoginOutcome::Rejected { message } => println!("{}: rejected ({})", email, message),
                LoginOutcome::LockedOut => println!("{}: locked out, not attempted", email),
            }
        }
        Command::Acquire { email } => match broker.acquire_session(email.as_deref()).await? {
            Some(session) => println!(
                "{}: {} cookie(s), expires {}",
                session.email,
                session.jar.cookies.len(),
                session.expires
            ),
            None => println!("no session available"),
        },
        Command::Status { email } => {
            let locked = broker.has_failed_login(&email).await?;
            println!("{}: {}", email, if locked { "locked out" } else { "clear" });
        }
    }
    Ok(())
}
