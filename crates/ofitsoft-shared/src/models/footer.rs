use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Icon;
use crate::content::{
    CollectionLens, ContentDocument, Entry, Ordered, Parent, Patch, SectionLens,
};
use crate::ops;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterContent {
    pub branding: Branding,
    pub newsletter: Newsletter,
    pub contact: ContactInfo,
    pub copyright: Copyright,
    pub social_links: Vec<SocialLink>,
    pub columns: Vec<FooterColumn>,
    #[serde(default)]
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branding {
    pub brand_name: String,
    pub tagline: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Newsletter {
    pub enabled: bool,
    pub title: String,
    pub description: String,
    pub placeholder: String,
    pub button_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Copyright {
    pub text: String,
    pub company_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub id: String,
    pub icon: Icon,
    pub href: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FooterColumn {
    pub id: String,
    pub title: String,
    pub order: i32,
    pub links: Vec<FooterLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FooterLink {
    pub id: String,
    pub label: String,
    pub href: String,
}

impl Entry for SocialLink {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entry for FooterColumn {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entry for FooterLink {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Parent for FooterColumn {
    type Child = FooterLink;

    fn children(&self) -> &[FooterLink] {
        &self.links
    }

    fn children_mut(&mut self) -> &mut Vec<FooterLink> {
        &mut self.links
    }
}

impl Ordered for FooterColumn {
    fn order(&self) -> i32 {
        self.order
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandingPatch {
    pub brand_name: Option<String>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
}

impl Patch<Branding> for BrandingPatch {
    fn apply(self, target: &mut Branding) {
        if let Some(brand_name) = self.brand_name {
            target.brand_name = brand_name;
        }
        if let Some(tagline) = self.tagline {
            target.tagline = tagline;
        }
        if let Some(description) = self.description {
            target.description = description;
        }
        if let Some(logo_url) = self.logo_url {
            target.logo_url = Some(logo_url).filter(|url| !url.is_empty());
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterPatch {
    pub enabled: Option<bool>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub placeholder: Option<String>,
    pub button_text: Option<String>,
}

impl Patch<Newsletter> for NewsletterPatch {
    fn apply(self, target: &mut Newsletter) {
        if let Some(enabled) = self.enabled {
            target.enabled = enabled;
        }
        if let Some(title) = self.title {
            target.title = title;
        }
        if let Some(description) = self.description {
            target.description = description;
        }
        if let Some(placeholder) = self.placeholder {
            target.placeholder = placeholder;
        }
        if let Some(button_text) = self.button_text {
            target.button_text = button_text;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactPatch {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl Patch<ContactInfo> for ContactPatch {
    fn apply(self, target: &mut ContactInfo) {
        if let Some(email) = self.email {
            target.email = email;
        }
        if let Some(phone) = self.phone {
            target.phone = phone;
        }
        if let Some(address) = self.address {
            target.address = address;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyrightPatch {
    pub text: Option<String>,
    pub company_name: Option<String>,
}

impl Patch<Copyright> for CopyrightPatch {
    fn apply(self, target: &mut Copyright) {
        if let Some(text) = self.text {
            target.text = text;
        }
        if let Some(company_name) = self.company_name {
            target.company_name = company_name;
        }
    }
}

pub const BRANDING: SectionLens<FooterContent, Branding> = SectionLens {
    name: "branding",
    get: |d| &d.branding,
    get_mut: |d| &mut d.branding,
};

pub const NEWSLETTER: SectionLens<FooterContent, Newsletter> = SectionLens {
    name: "newsletter",
    get: |d| &d.newsletter,
    get_mut: |d| &mut d.newsletter,
};

pub const CONTACT: SectionLens<FooterContent, ContactInfo> = SectionLens {
    name: "contact",
    get: |d| &d.contact,
    get_mut: |d| &mut d.contact,
};

pub const COPYRIGHT: SectionLens<FooterContent, Copyright> = SectionLens {
    name: "copyright",
    get: |d| &d.copyright,
    get_mut: |d| &mut d.copyright,
};

pub const SOCIAL_LINKS: CollectionLens<FooterContent, SocialLink> = CollectionLens {
    name: "socialLinks",
    get: |d| &d.social_links,
    get_mut: |d| &mut d.social_links,
};

pub const COLUMNS: CollectionLens<FooterContent, FooterColumn> = CollectionLens {
    name: "columns",
    get: |d| &d.columns,
    get_mut: |d| &mut d.columns,
};

impl ContentDocument for FooterContent {
    const DOMAIN: &'static str = "footer";
    const STORAGE_KEY: &'static str = "footer-content-storage";

    fn defaults() -> Self {
        Self {
            branding: Branding {
                brand_name: "Ofitsoft".to_string(),
                tagline: "Software that fits your business".to_string(),
                description: "We design, build and ship web and mobile products.".to_string(),
                logo_url: None,
            },
            newsletter: Newsletter {
                enabled: true,
                title: "Stay in the loop".to_string(),
                description: "Product news and engineering notes, once a month.".to_string(),
                placeholder: "Enter your email".to_string(),
                button_text: "Subscribe".to_string(),
            },
            contact: ContactInfo {
                email: "hello@ofitsoft.com".to_string(),
                phone: "+1 (555) 010-0100".to_string(),
                address: "Remote-first".to_string(),
            },
            copyright: Copyright {
                text: "All rights reserved.".to_string(),
                company_name: "Ofitsoft".to_string(),
            },
            social_links: vec![
                social("social-1", Icon::Facebook, "https://facebook.com/ofitsoft", "Facebook"),
                social("social-2", Icon::Twitter, "https://twitter.com/ofitsoft", "Twitter"),
                social("social-3", Icon::Linkedin, "https://linkedin.com/company/ofitsoft", "LinkedIn"),
                social("social-4", Icon::Instagram, "https://instagram.com/ofitsoft", "Instagram"),
            ],
            columns: vec![
                column(
                    "column-1",
                    "Services",
                    0,
                    &[
                        ("link-1", "Web Development", "/services/web-development"),
                        ("link-2", "Mobile Apps", "/services/mobile-apps"),
                        ("link-3", "UI/UX Design", "/services/ui-ux-design"),
                    ],
                ),
                column(
                    "column-2",
                    "Company",
                    1,
                    &[
                        ("link-4", "About Us", "/about"),
                        ("link-5", "Portfolio", "/portfolio"),
                        ("link-6", "Blog", "/blog"),
                        ("link-7", "Contact", "/contact"),
                    ],
                ),
                column(
                    "column-3",
                    "Support",
                    2,
                    &[
                        ("link-8", "Privacy Policy", "/privacy"),
                        ("link-9", "Terms of Service", "/terms"),
                    ],
                ),
            ],
            last_updated: DateTime::<Utc>::default(),
        }
    }

    fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    fn set_last_updated(&mut self, at: DateTime<Utc>) {
        self.last_updated = at;
    }
}

fn social(id: &str, icon: Icon, href: &str, label: &str) -> SocialLink {
    SocialLink {
        id: id.to_string(),
        icon,
        href: href.to_string(),
        label: label.to_string(),
    }
}

fn column(id: &str, title: &str, order: i32, links: &[(&str, &str, &str)]) -> FooterColumn {
    FooterColumn {
        id: id.to_string(),
        title: title.to_string(),
        order,
        links: links
            .iter()
            .map(|(id, label, href)| FooterLink {
                id: id.to_string(),
                label: label.to_string(),
                href: href.to_string(),
            })
            .collect(),
    }
}

pub fn add_social_link(doc: &mut FooterContent, link: SocialLink) -> bool {
    ops::add_entry(doc, SOCIAL_LINKS, link)
}

pub fn remove_social_link(doc: &mut FooterContent, id: &str) -> bool {
    ops::remove_entry(doc, SOCIAL_LINKS, id)
}

pub fn add_column_link(doc: &mut FooterContent, column_id: &str, link: FooterLink) -> bool {
    ops::add_nested_entry(doc, COLUMNS, column_id, link)
}

pub fn remove_column_link(doc: &mut FooterContent, column_id: &str, link_id: &str) -> bool {
    ops::remove_nested_entry(doc, COLUMNS, column_id, link_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_link() -> SocialLink {
        SocialLink {
            id: "social-999".to_string(),
            icon: Icon::Link2,
            href: "#".to_string(),
            label: "New Link".to_string(),
        }
    }

    #[test]
    fn test_add_and_remove_social_link() {
        let mut doc = FooterContent::defaults();
        let original = doc.social_links.clone();
        assert_eq!(original.len(), 4);
        let stamp = doc.last_updated;

        assert!(add_social_link(&mut doc, new_link()));
        assert_eq!(doc.social_links.len(), 5);
        assert_eq!(doc.social_links.last(), Some(&new_link()));
        assert_ne!(doc.last_updated, stamp);

        assert!(remove_social_link(&mut doc, "social-999"));
        assert_eq!(doc.social_links, original);
    }

    #[test]
    fn test_branding_patch_keeps_other_sections() {
        let mut doc = FooterContent::defaults();
        let patch = BrandingPatch {
            brand_name: Some("B".to_string()),
            ..Default::default()
        };
        assert!(ops::update_section(&mut doc, BRANDING, patch));

        let defaults = FooterContent::defaults();
        assert_eq!(doc.branding.brand_name, "B");
        assert_eq!(doc.branding.tagline, defaults.branding.tagline);
        assert_eq!(doc.newsletter, defaults.newsletter);
        assert_eq!(doc.copyright, defaults.copyright);
    }

    #[test]
    fn test_empty_logo_url_clears_it() {
        let mut branding = FooterContent::defaults().branding;
        BrandingPatch {
            logo_url: Some("/logo.svg".to_string()),
            ..Default::default()
        }
        .apply(&mut branding);
        assert_eq!(branding.logo_url.as_deref(), Some("/logo.svg"));

        BrandingPatch {
            logo_url: Some(String::new()),
            ..Default::default()
        }
        .apply(&mut branding);
        assert!(branding.logo_url.is_none());
    }

    #[test]
    fn test_column_links_do_not_leak_between_columns() {
        let mut doc = FooterContent::defaults();
        let siblings: Vec<_> = doc.columns[1..].to_vec();

        let link = FooterLink {
            id: "link-100".to_string(),
            label: "Careers".to_string(),
            href: "/careers".to_string(),
        };
        assert!(add_column_link(&mut doc, "column-1", link));
        assert_eq!(doc.columns[0].links.len(), 4);
        assert_eq!(&doc.columns[1..], siblings.as_slice());

        assert!(remove_column_link(&mut doc, "column-1", "link-100"));
        assert_eq!(doc.columns[0].links.len(), 3);
        assert_eq!(&doc.columns[1..], siblings.as_slice());
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let json = serde_json::to_value(FooterContent::defaults()).unwrap();
        assert!(json.get("socialLinks").is_some());
        assert!(json.get("lastUpdated").is_some());
        assert_eq!(json["branding"]["brandName"], "Ofitsoft");
        assert_eq!(json["socialLinks"][0]["icon"], "Facebook");
    }
}
