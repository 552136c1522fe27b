pub mod about;
pub mod categories;
pub mod footer;
mod icon;
pub mod services;

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::content::ContentDocument;

pub use about::{AboutContent, CompanyValue, Hero, HeroPatch, Mission, Stat, TeamMember};
pub use categories::{CategoriesContent, Category};
pub use footer::{
    Branding, BrandingPatch, ContactInfo, Copyright, FooterColumn, FooterContent, FooterLink,
    Newsletter, SocialLink,
};
pub use icon::Icon;
pub use services::{Service, ServicesContent};

/// The content domains that ship with a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Footer,
    Categories,
    About,
    Services,
}

impl Domain {
    pub const ALL: [Domain; 4] = [
        Domain::Footer,
        Domain::Categories,
        Domain::About,
        Domain::Services,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Domain::Footer => FooterContent::DOMAIN,
            Domain::Categories => CategoriesContent::DOMAIN,
            Domain::About => AboutContent::DOMAIN,
            Domain::Services => ServicesContent::DOMAIN,
        }
    }

    pub fn storage_key(self) -> &'static str {
        match self {
            Domain::Footer => FooterContent::STORAGE_KEY,
            Domain::Categories => CategoriesContent::STORAGE_KEY,
            Domain::About => AboutContent::STORAGE_KEY,
            Domain::Services => ServicesContent::STORAGE_KEY,
        }
    }

    /// Parse `body` as this domain's document and re-serialize it, so that
    /// only well-formed documents are stored and unknown fields are dropped.
    pub fn normalize(self, body: Value) -> Result<Value, serde_json::Error> {
        match self {
            Domain::Footer => normalize_as::<FooterContent>(body),
            Domain::Categories => normalize_as::<CategoriesContent>(body),
            Domain::About => normalize_as::<AboutContent>(body),
            Domain::Services => normalize_as::<ServicesContent>(body),
        }
    }
}

fn normalize_as<D: ContentDocument>(body: Value) -> Result<Value, serde_json::Error> {
    let doc: D = serde_json::from_value(body)?;
    serde_json::to_value(doc)
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Domain::ALL
            .into_iter()
            .find(|d| d.name() == s)
            .ok_or_else(|| format!("unknown content domain '{}'", s))
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_names_parse() {
        for domain in Domain::ALL {
            assert_eq!(domain.name().parse::<Domain>(), Ok(domain));
        }
        assert!("blog".parse::<Domain>().is_err());
    }

    #[test]
    fn test_storage_keys_are_distinct() {
        assert_eq!(Domain::Footer.storage_key(), "footer-content-storage");
        let mut keys: Vec<_> = Domain::ALL.iter().map(|d| d.storage_key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), Domain::ALL.len());
    }

    #[test]
    fn test_normalize_accepts_defaults() {
        for domain in Domain::ALL {
            let body = match domain {
                Domain::Footer => serde_json::to_value(FooterContent::defaults()),
                Domain::Categories => serde_json::to_value(CategoriesContent::defaults()),
                Domain::About => serde_json::to_value(AboutContent::defaults()),
                Domain::Services => serde_json::to_value(ServicesContent::defaults()),
            }
            .unwrap();
            assert_eq!(domain.normalize(body.clone()).unwrap(), body);
        }
    }

    #[test]
    fn test_normalize_rejects_wrong_shape() {
        let body = serde_json::json!({ "categories": "not a list" });
        assert!(Domain::Categories.normalize(body).is_err());

        let footer = serde_json::to_value(FooterContent::defaults()).unwrap();
        assert!(Domain::Categories.normalize(footer).is_err());
    }
}
