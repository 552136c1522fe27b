mod auth;
mod categories;
mod content;
mod footer;

pub use auth::{login, logout};
pub use categories::CategoriesCommand;
pub use content::{list, run as run_content, set_status, ContentAction};
pub use footer::{FooterCommand, FooterSubcommand};

use anyhow::Result;
use ofitsoft_shared::ContentDocument;

use crate::config::Config;
use crate::store::{ContentStore, WritePolicy};

pub fn open_store<D: ContentDocument>(config: &Config) -> ContentStore<D> {
    ContentStore::open(config.cache(), config.write_policy)
}

/// Under the manual policy a command writes its store once, when it is done.
pub fn close_store<D: ContentDocument>(store: &ContentStore<D>) -> Result<()> {
    if store.policy() == WritePolicy::Manual {
        store.persist()?;
    }
    Ok(())
}

/// Print the outcome of a local edit.
fn report(applied: bool, done: &str) {
    if applied {
        println!("{} (not pushed yet)", done);
    } else {
        println!("Nothing changed");
    }
}
