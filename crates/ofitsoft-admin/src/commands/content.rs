use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use ofitsoft_shared::{
    AboutContent, CategoriesContent, ContentDocument, ContentStatus, Domain, FooterContent,
    HasStatus, ServicesContent,
};

use super::{close_store, open_store, report};
use crate::api::ApiClient;
use crate::config::Config;
use crate::store::{ContentStore, SyncState};

/// Whole-document commands that work the same for every domain.
#[derive(Debug, Clone)]
pub enum ContentAction {
    Pull { force: bool },
    Push,
    Show,
    Status,
    Reset,
    Import { file: PathBuf },
    Delete,
}

pub async fn run(
    domain: Domain,
    action: ContentAction,
    config: &Config,
    api: &mut ApiClient,
) -> Result<()> {
    match domain {
        Domain::Footer => run_for::<FooterContent>(action, config, api).await,
        Domain::Categories => run_for::<CategoriesContent>(action, config, api).await,
        Domain::About => run_for::<AboutContent>(action, config, api).await,
        Domain::Services => run_for::<ServicesContent>(action, config, api).await,
    }
}

async fn run_for<D: ContentDocument>(
    action: ContentAction,
    config: &Config,
    api: &mut ApiClient,
) -> Result<()> {
    let mut store: ContentStore<D> = open_store(config);

    match action {
        ContentAction::Pull { force } => {
            let taken = if force {
                store.pull_forced(api).await?
            } else {
                store.pull(api).await?
            };

            if taken {
                println!("Pulled {}", D::DOMAIN);
            } else if store.sync_state() == SyncState::Uninitialized {
                println!("Nothing saved remotely for {} yet, keeping defaults", D::DOMAIN);
            } else {
                println!(
                    "Kept local {} ({}), use --force to overwrite",
                    D::DOMAIN,
                    store.sync_state()
                );
            }
        }
        ContentAction::Push => {
            store.push(api).await?;
            println!("Pushed {}", D::DOMAIN);
        }
        ContentAction::Show => {
            let doc = store.content().context("Content not loaded")?;
            println!("{}", serde_json::to_string_pretty(doc)?);
        }
        ContentAction::Status => {
            println!("{}: {}", D::DOMAIN, store.sync_state());
            if let Some(doc) = store.content() {
                println!("  last updated: {}", doc.last_updated().to_rfc3339());
            }
            println!("  cache: {}", store.cache().dir().display());
        }
        ContentAction::Reset => {
            store.reset_to_defaults();
            println!("Reset {} to defaults (not pushed yet)", D::DOMAIN);
        }
        ContentAction::Import { file } => {
            let contents = std::fs::read_to_string(&file)
                .with_context(|| format!("Could not read {}", file.display()))?;
            let doc: D = serde_json::from_str(&contents)
                .with_context(|| format!("{} is not a valid {} document", file.display(), D::DOMAIN))?;
            store.set_content(doc);
            println!("Imported {} from {} (not pushed yet)", D::DOMAIN, file.display());
        }
        ContentAction::Delete => {
            api.delete_content(D::DOMAIN).await?;
            println!("Deleted remote {}", D::DOMAIN);
        }
    }

    close_store(&store)
}

/// Publish or unpublish a domain that carries a status.
pub fn set_status(domain: Domain, status: ContentStatus, config: &Config) -> Result<()> {
    match domain {
        Domain::About => set_status_for::<AboutContent>(config, status),
        Domain::Services => set_status_for::<ServicesContent>(config, status),
        other => bail!("{} has no publish status", other),
    }
}

fn set_status_for<D: ContentDocument + HasStatus>(config: &Config, status: ContentStatus) -> Result<()> {
    let mut store: ContentStore<D> = open_store(config);
    let applied = store.set_status(status);
    report(applied, &format!("Marked {} {}", D::DOMAIN, status));
    close_store(&store)
}

/// Remote documents alongside the local sync state of each domain.
pub async fn list(config: &Config, api: &ApiClient) -> Result<()> {
    let remote = api.list_content().await?;

    for domain in Domain::ALL {
        let local = match domain {
            Domain::Footer => open_store::<FooterContent>(config).sync_state(),
            Domain::Categories => open_store::<CategoriesContent>(config).sync_state(),
            Domain::About => open_store::<AboutContent>(config).sync_state(),
            Domain::Services => open_store::<ServicesContent>(config).sync_state(),
        };
        let saved = remote
            .iter()
            .find(|s| s.domain == domain.name())
            .map(|s| s.updated_at.to_rfc3339())
            .unwrap_or_else(|| "never saved".to_string());

        println!("{:<12} {:<14} {}", domain.name(), local.to_string(), saved);
    }

    Ok(())
}
