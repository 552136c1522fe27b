use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ofitsoft_shared::{ContentStatus, Domain};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ofitsoft_admin::api::ApiClient;
use ofitsoft_admin::commands::{self, CategoriesCommand, ContentAction, FooterCommand};
use ofitsoft_admin::config::Config;

#[derive(Parser)]
#[command(name = "ofitsoft-admin")]
#[command(version)]
#[command(about = "Edit Ofitsoft site content and sync it with the Content API", long_about = None)]
struct Cli {
    /// Content API base URL
    #[arg(long, global = true, env = "OFITSOFT_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in as the site admin
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "OFITSOFT_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored login token
    Logout,

    /// List remote documents and the local state of each domain
    List,

    /// Fetch a domain from the server (local edits win unless --force)
    Pull {
        domain: Domain,

        /// Overwrite local edits with the remote copy
        #[arg(long, short)]
        force: bool,
    },

    /// Save a domain to the server
    Push { domain: Domain },

    /// Print the local document as JSON
    Show { domain: Domain },

    /// Show the sync state of a domain
    Status { domain: Domain },

    /// Discard local edits and go back to the built-in defaults
    Reset { domain: Domain },

    /// Replace the local document with a JSON file
    Import { domain: Domain, file: PathBuf },

    /// Delete the remote copy of a domain
    Delete { domain: Domain },

    /// Mark a domain as published
    Publish { domain: Domain },

    /// Mark a domain as draft
    Unpublish { domain: Domain },

    /// Edit the footer
    Footer(FooterCommand),

    /// Edit the categories
    Categories(CategoriesCommand),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ofitsoft_admin=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }

    let mut api = ApiClient::new(&config.api_url, config.home());
    if let Err(e) = api.load_tokens() {
        tracing::warn!("Ignoring stored login: {:#}", e);
    }

    let (domain, action) = match cli.command {
        Commands::Login { email, password } => {
            return commands::login(&mut api, &email, &password).await;
        }
        Commands::Logout => return commands::logout(&mut api),
        Commands::List => return commands::list(&config, &api).await,
        Commands::Publish { domain } => {
            return commands::set_status(domain, ContentStatus::Published, &config);
        }
        Commands::Unpublish { domain } => {
            return commands::set_status(domain, ContentStatus::Draft, &config);
        }
        Commands::Footer(cmd) => return cmd.run(&config),
        Commands::Categories(cmd) => return cmd.run(&config),
        Commands::Pull { domain, force } => (domain, ContentAction::Pull { force }),
        Commands::Push { domain } => (domain, ContentAction::Push),
        Commands::Show { domain } => (domain, ContentAction::Show),
        Commands::Status { domain } => (domain, ContentAction::Status),
        Commands::Reset { domain } => (domain, ContentAction::Reset),
        Commands::Import { domain, file } => (domain, ContentAction::Import { file }),
        Commands::Delete { domain } => (domain, ContentAction::Delete),
    };

    commands::run_content(domain, action, &config, &mut api).await
}
