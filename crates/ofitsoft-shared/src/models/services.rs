use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Hero, Icon};
use crate::content::{
    CollectionLens, ContentDocument, ContentStatus, Entry, HasStatus, Ordered, Parent,
    SectionLens,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicesContent {
    pub hero: Hero,
    pub services: Vec<Service>,
    #[serde(default)]
    pub status: ContentStatus,
    #[serde(default)]
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: Icon,
    #[serde(default)]
    pub order: i32,
    /// Bullet points; each feature string is its own id.
    #[serde(default)]
    pub features: Vec<String>,
}

impl Entry for Service {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Parent for Service {
    type Child = String;

    fn children(&self) -> &[String] {
        &self.features
    }

    fn children_mut(&mut self) -> &mut Vec<String> {
        &mut self.features
    }
}

impl Ordered for Service {
    fn order(&self) -> i32 {
        self.order
    }
}

pub const HERO: SectionLens<ServicesContent, Hero> = SectionLens {
    name: "hero",
    get: |d| &d.hero,
    get_mut: |d| &mut d.hero,
};

pub const SERVICES: CollectionLens<ServicesContent, Service> = CollectionLens {
    name: "services",
    get: |d| &d.services,
    get_mut: |d| &mut d.services,
};

impl ContentDocument for ServicesContent {
    const DOMAIN: &'static str = "services";
    const STORAGE_KEY: &'static str = "services-content-storage";

    fn defaults() -> Self {
        Self {
            hero: Hero {
                title: "Our Services".to_string(),
                subtitle: "From first sketch to production".to_string(),
                description: "Pick a single service or let us run the whole project.".to_string(),
                image_url: None,
            },
            services: vec![
                service(
                    "service-1",
                    "Web Development",
                    Icon::Code,
                    0,
                    &["Responsive sites", "Web applications", "CMS integration"],
                ),
                service(
                    "service-2",
                    "Mobile Apps",
                    Icon::Smartphone,
                    1,
                    &["iOS", "Android", "Cross-platform"],
                ),
                service(
                    "service-3",
                    "UI/UX Design",
                    Icon::Palette,
                    2,
                    &["User research", "Wireframes", "Design systems"],
                ),
                service(
                    "service-4",
                    "Cloud & DevOps",
                    Icon::Cloud,
                    3,
                    &["CI/CD pipelines", "Infrastructure as code"],
                ),
            ],
            status: ContentStatus::Published,
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

impl HasStatus for ServicesContent {
    fn status(&self) -> ContentStatus {
        self.status
    }

    fn status_mut(&mut self) -> &mut ContentStatus {
        &mut self.status
    }
}

fn service(id: &str, title: &str, icon: Icon, order: i32, features: &[&str]) -> Service {
    Service {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        icon,
        order,
        features: features.iter().map(|f| f.to_string()).collect(),
    }
}
