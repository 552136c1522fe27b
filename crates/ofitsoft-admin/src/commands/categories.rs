use anyhow::Result;
use clap::{Args, Subcommand};
use ofitsoft_shared::{
    categories::{self, CATEGORIES},
    CategoriesContent, Category,
};

use super::{close_store, open_store, report};
use crate::config::Config;
use crate::store::ContentStore;

#[derive(Args)]
pub struct CategoriesCommand {
    #[command(subcommand)]
    pub command: CategoriesSubcommand,
}

#[derive(Subcommand)]
pub enum CategoriesSubcommand {
    /// Add a category at the end of the list
    Add {
        name: String,

        /// URL slug, derived from the name when omitted
        #[arg(long, default_value = "")]
        slug: String,
    },

    /// Delete a category and its subcategories
    Remove { id: String },

    /// Move a category to a new position (0 is first)
    Move { id: String, position: usize },

    /// Add a subcategory name to a category
    AddSub { id: String, name: String },

    /// Remove a subcategory name from a category
    RemoveSub { id: String, name: String },
}

impl CategoriesCommand {
    pub fn run(self, config: &Config) -> Result<()> {
        let mut store: ContentStore<CategoriesContent> = open_store(config);
        apply(&mut store, self.command);
        close_store(&store)
    }
}

fn apply(store: &mut ContentStore<CategoriesContent>, command: CategoriesSubcommand) {
    match command {
        CategoriesSubcommand::Add { name, slug } => {
            let Some(doc) = store.content() else {
                report(false, "");
                return;
            };
            let category = Category::new(doc, &name, &slug);
            let done = format!("Added category {} ({})", category.id, category.slug);
            report(
                store.mutate(|doc| categories::add_category(doc, category)),
                &done,
            );
        }
        CategoriesSubcommand::Remove { id } => {
            report(
                store.mutate(|doc| categories::delete_category(doc, &id)),
                &format!("Deleted category {}", id),
            );
        }
        CategoriesSubcommand::Move { id, position } => {
            report(
                store.move_entry(CATEGORIES, &id, position),
                &format!("Moved category {} to position {}", id, position),
            );
        }
        CategoriesSubcommand::AddSub { id, name } => {
            report(
                store.mutate(|doc| categories::add_subcategory(doc, &id, &name)),
                &format!("Added subcategory '{}' to {}", name.trim(), id),
            );
        }
        CategoriesSubcommand::RemoveSub { id, name } => {
            report(
                store.mutate(|doc| categories::remove_subcategory(doc, &id, &name)),
                &format!("Removed subcategory '{}' from {}", name, id),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FileCache, WritePolicy};
    use ofitsoft_shared::ContentDocument;
    use tempfile::tempdir;

    #[test]
    fn test_add_derives_slug_and_persists() {
        let dir = tempdir().unwrap();
        {
            let mut store: ContentStore<CategoriesContent> =
                ContentStore::open(FileCache::new(dir.path()), WritePolicy::WriteThrough);
            apply(
                &mut store,
                CategoriesSubcommand::Add {
                    name: "Mobile Apps".to_string(),
                    slug: String::new(),
                },
            );
        }

        let store: ContentStore<CategoriesContent> =
            ContentStore::open(FileCache::new(dir.path()), WritePolicy::Manual);
        let added = store.content().unwrap().categories.last().unwrap();
        assert_eq!(added.name, "Mobile Apps");
        assert_eq!(added.slug, "mobile-apps");
    }

    #[test]
    fn test_manual_policy_writes_once_on_close() {
        let dir = tempdir().unwrap();
        let cache = FileCache::new(dir.path());
        let mut store: ContentStore<CategoriesContent> =
            ContentStore::open(cache.clone(), WritePolicy::Manual);

        apply(
            &mut store,
            CategoriesSubcommand::AddSub {
                id: "category-2".to_string(),
                name: "Wireframes".to_string(),
            },
        );
        assert!(cache.read(CategoriesContent::STORAGE_KEY).unwrap().is_none());

        close_store(&store).unwrap();

        let reopened: ContentStore<CategoriesContent> =
            ContentStore::open(cache, WritePolicy::WriteThrough);
        let category = CATEGORIES
            .find(reopened.content().unwrap(), "category-2")
            .unwrap();
        assert!(category.subcategories.contains(&"Wireframes".to_string()));
    }

    #[test]
    fn test_blank_subcategory_is_ignored() {
        let dir = tempdir().unwrap();
        let mut store: ContentStore<CategoriesContent> =
            ContentStore::open(FileCache::new(dir.path()), WritePolicy::WriteThrough);

        apply(
            &mut store,
            CategoriesSubcommand::AddSub {
                id: "category-1".to_string(),
                name: "   ".to_string(),
            },
        );
        assert_eq!(store.content(), Some(&CategoriesContent::defaults()));
    }

    #[test]
    fn test_move_to_front() {
        let dir = tempdir().unwrap();
        let mut store: ContentStore<CategoriesContent> =
            ContentStore::open(FileCache::new(dir.path()), WritePolicy::WriteThrough);

        apply(
            &mut store,
            CategoriesSubcommand::Move {
                id: "category-2".to_string(),
                position: 0,
            },
        );
        assert_eq!(store.content().unwrap().categories[0].id, "category-2");
    }
}
