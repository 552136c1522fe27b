use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod auth;
mod config;
mod db;
mod error;
mod handlers;
mod routes;

use db::ContentRepo;

const ENV_HELP: &str = "\
Environment:
  DATABASE_URL         Postgres URL (in-memory store when unset)
  JWT_SECRET           Secret used to sign admin tokens
  JWT_EXPIRES_IN       Token lifetime in seconds (default 3600)
  ADMIN_EMAIL          Admin login email
  ADMIN_PASSWORD_HASH  Argon2 hash of the admin password
  PORT                 Listen port (default 3000)";

#[derive(Parser)]
#[command(name = "ofitsoft-server")]
#[command(version)]
#[command(about = "Content API for the Ofitsoft site", long_about = None)]
#[command(after_help = ENV_HELP)]
struct Cli {
    /// Listen port, overrides PORT
    #[arg(long)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print an argon2 hash to use as ADMIN_PASSWORD_HASH
    HashPassword { password: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Some(Command::HashPassword { password }) = cli.command {
        println!("{}", auth::hash_password(&password)?);
        return Ok(());
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ofitsoft_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = config::Config::from_env()?;
    if let Some(port) = cli.port {
        config.port = port;
    }

    let repo = match &config.database_url {
        Some(url) => ContentRepo::Postgres(db::create_pool(url).await?),
        None => {
            tracing::warn!("DATABASE_URL not set, content is kept in memory only");
            ContentRepo::memory()
        }
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = routes::create_router(repo, config);

    tracing::info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::try_parse_from(["ofitsoft-server", "--port", "3001"]).unwrap();
        assert_eq!(cli.port, Some(3001));
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["ofitsoft-server", "hash-password", "hunter22"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::HashPassword { ref password }) if password == "hunter22"
        ));

        assert!(Cli::try_parse_from(["ofitsoft-server", "--bogus"]).is_err());

        let err = Cli::try_parse_from(["ofitsoft-server", "--version"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}
