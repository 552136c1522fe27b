use anyhow::Result;
use clap::{Args, Subcommand};
use ofitsoft_shared::{
    footer::{self, ContactPatch, COLUMNS, CONTACT, SOCIAL_LINKS},
    next_order, BrandingPatch, FooterColumn, FooterContent, FooterLink, Icon, Parent, SocialLink,
};

use super::{close_store, open_store, report};
use crate::config::Config;
use crate::store::ContentStore;

#[derive(Args)]
pub struct FooterCommand {
    #[command(subcommand)]
    pub command: FooterSubcommand,
}

#[derive(Subcommand)]
pub enum FooterSubcommand {
    /// Update the brand block (only the given fields change)
    SetBranding {
        #[arg(long)]
        brand_name: Option<String>,

        #[arg(long)]
        tagline: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Logo URL, pass an empty string to remove it
        #[arg(long)]
        logo_url: Option<String>,
    },

    /// Update the contact block
    SetContact {
        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        address: Option<String>,
    },

    /// Add a social link
    AddSocial {
        /// Icon name, e.g. Facebook, Github, Link2
        #[arg(long, default_value = "Link2", value_parser = parse_icon)]
        icon: Icon,

        #[arg(long, default_value = "#")]
        href: String,

        #[arg(long, default_value = "New Link")]
        label: String,
    },

    /// Remove a social link by id
    RemoveSocial { id: String },

    /// Add an empty link column
    AddColumn { title: String },

    /// Remove a column and all of its links
    RemoveColumn { id: String },

    /// Add a link to a column
    AddLink {
        column_id: String,

        #[arg(long)]
        label: String,

        #[arg(long, default_value = "#")]
        href: String,
    },

    /// Remove a link from a column
    RemoveLink { column_id: String, link_id: String },
}

/// Icons given on the command line must name a real variant; the lenient
/// fallback only applies to stored documents.
fn parse_icon(s: &str) -> Result<Icon, String> {
    s.parse()
}

impl FooterCommand {
    pub fn run(self, config: &Config) -> Result<()> {
        let mut store: ContentStore<FooterContent> = open_store(config);
        apply(&mut store, self.command);
        close_store(&store)
    }
}

fn apply(store: &mut ContentStore<FooterContent>, command: FooterSubcommand) {
    match command {
        FooterSubcommand::SetBranding {
            brand_name,
            tagline,
            description,
            logo_url,
        } => {
            let patch = BrandingPatch {
                brand_name,
                tagline,
                description,
                logo_url,
            };
            report(store.update_section(footer::BRANDING, patch), "Updated branding");
        }
        FooterSubcommand::SetContact {
            email,
            phone,
            address,
        } => {
            let patch = ContactPatch {
                email,
                phone,
                address,
            };
            report(store.update_section(CONTACT, patch), "Updated contact");
        }
        FooterSubcommand::AddSocial { icon, href, label } => {
            let Some(doc) = store.content() else {
                report(false, "");
                return;
            };
            let link = SocialLink {
                id: SOCIAL_LINKS.fresh_id(doc, "social"),
                icon,
                href,
                label,
            };
            let id = link.id.clone();
            report(
                store.mutate(|doc| footer::add_social_link(doc, link)),
                &format!("Added social link {}", id),
            );
        }
        FooterSubcommand::RemoveSocial { id } => {
            report(
                store.mutate(|doc| footer::remove_social_link(doc, &id)),
                &format!("Removed social link {}", id),
            );
        }
        FooterSubcommand::AddColumn { title } => {
            let Some(doc) = store.content() else {
                report(false, "");
                return;
            };
            let column = FooterColumn {
                id: COLUMNS.fresh_id(doc, "column"),
                title,
                order: next_order(&doc.columns),
                links: Vec::new(),
            };
            let id = column.id.clone();
            report(
                store.add_entry(COLUMNS, column),
                &format!("Added column {}", id),
            );
        }
        FooterSubcommand::RemoveColumn { id } => {
            report(
                store.remove_entry(COLUMNS, &id),
                &format!("Removed column {}", id),
            );
        }
        FooterSubcommand::AddLink {
            column_id,
            label,
            href,
        } => {
            let Some(column) = store.content().and_then(|doc| COLUMNS.find(doc, &column_id)) else {
                report(false, "");
                return;
            };
            let link = FooterLink {
                id: ofitsoft_shared::generate_id("link", column.children()),
                label,
                href,
            };
            let id = link.id.clone();
            report(
                store.mutate(|doc| footer::add_column_link(doc, &column_id, link)),
                &format!("Added link {} to {}", id, column_id),
            );
        }
        FooterSubcommand::RemoveLink { column_id, link_id } => {
            report(
                store.mutate(|doc| footer::remove_column_link(doc, &column_id, &link_id)),
                &format!("Removed link {} from {}", link_id, column_id),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FileCache, SyncState, WritePolicy};
    use ofitsoft_shared::ContentDocument;
    use tempfile::tempdir;

    fn store(dir: &std::path::Path) -> ContentStore<FooterContent> {
        ContentStore::open(FileCache::new(dir), WritePolicy::WriteThrough)
    }

    #[test]
    fn test_icon_argument_is_strict() {
        assert_eq!(parse_icon("github"), Ok(Icon::Github));
        assert_eq!(parse_icon("LINKEDIN"), Ok(Icon::Linkedin));
        assert!(parse_icon("githb").is_err());
    }

    #[test]
    fn test_add_and_remove_column_link() {
        let dir = tempdir().unwrap();
        let mut store = store(dir.path());

        apply(
            &mut store,
            FooterSubcommand::AddLink {
                column_id: "column-1".to_string(),
                label: "Careers".to_string(),
                href: "/careers".to_string(),
            },
        );
        let column = COLUMNS.find(store.content().unwrap(), "column-1").unwrap();
        let added = column.links.last().unwrap().clone();
        assert_eq!(added.label, "Careers");
        assert!(added.id.starts_with("link-"));

        apply(
            &mut store,
            FooterSubcommand::RemoveLink {
                column_id: "column-1".to_string(),
                link_id: added.id.clone(),
            },
        );
        let column = COLUMNS.find(store.content().unwrap(), "column-1").unwrap();
        assert!(column.links.iter().all(|l| l.id != added.id));
        assert_eq!(store.sync_state(), SyncState::Dirty);
    }

    #[test]
    fn test_add_column_goes_last() {
        let dir = tempdir().unwrap();
        let mut store = store(dir.path());

        apply(
            &mut store,
            FooterSubcommand::AddColumn {
                title: "Legal".to_string(),
            },
        );
        let columns = &store.content().unwrap().columns;
        assert_eq!(columns.len(), 4);
        assert_eq!(columns[3].title, "Legal");
        assert_eq!(columns[3].order, columns[2].order + 1);
    }

    #[test]
    fn test_link_to_missing_column_changes_nothing() {
        let dir = tempdir().unwrap();
        let mut store = store(dir.path());

        apply(
            &mut store,
            FooterSubcommand::AddLink {
                column_id: "column-404".to_string(),
                label: "Nowhere".to_string(),
                href: "#".to_string(),
            },
        );
        assert_eq!(store.content(), Some(&FooterContent::defaults()));
        assert_eq!(store.sync_state(), SyncState::Uninitialized);
    }

    #[test]
    fn test_set_branding_clears_logo() {
        let dir = tempdir().unwrap();
        let mut store = store(dir.path());

        apply(
            &mut store,
            FooterSubcommand::SetBranding {
                brand_name: None,
                tagline: None,
                description: None,
                logo_url: Some("https://cdn.ofitsoft.com/logo.svg".to_string()),
            },
        );
        assert!(store.content().unwrap().branding.logo_url.is_some());

        apply(
            &mut store,
            FooterSubcommand::SetBranding {
                brand_name: None,
                tagline: None,
                description: None,
                logo_url: Some(String::new()),
            },
        );
        assert!(store.content().unwrap().branding.logo_url.is_none());
    }
}
