use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Icon, SocialLink};
use crate::content::{
    CollectionLens, ContentDocument, ContentStatus, Entry, HasStatus, Parent, Patch, SectionLens,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutContent {
    pub hero: Hero,
    pub mission: Mission,
    pub stats: Vec<Stat>,
    pub values: Vec<CompanyValue>,
    pub team: Vec<TeamMember>,
    #[serde(default)]
    pub status: ContentStatus,
    #[serde(default)]
    pub last_updated: DateTime<Utc>,
}

/// Page hero block, shared with the services page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub id: String,
    pub label: String,
    pub value: String,
    pub icon: Icon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyValue {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: Icon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub role: String,
    pub bio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub socials: Vec<SocialLink>,
}

impl Entry for Stat {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entry for CompanyValue {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entry for TeamMember {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Parent for TeamMember {
    type Child = SocialLink;

    fn children(&self) -> &[SocialLink] {
        &self.socials
    }

    fn children_mut(&mut self) -> &mut Vec<SocialLink> {
        &mut self.socials
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroPatch {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl Patch<Hero> for HeroPatch {
    fn apply(self, target: &mut Hero) {
        if let Some(title) = self.title {
            target.title = title;
        }
        if let Some(subtitle) = self.subtitle {
            target.subtitle = subtitle;
        }
        if let Some(description) = self.description {
            target.description = description;
        }
        if let Some(image_url) = self.image_url {
            target.image_url = Some(image_url).filter(|url| !url.is_empty());
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MissionPatch {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl Patch<Mission> for MissionPatch {
    fn apply(self, target: &mut Mission) {
        if let Some(title) = self.title {
            target.title = title;
        }
        if let Some(body) = self.body {
            target.body = body;
        }
    }
}

pub const HERO: SectionLens<AboutContent, Hero> = SectionLens {
    name: "hero",
    get: |d| &d.hero,
    get_mut: |d| &mut d.hero,
};

pub const MISSION: SectionLens<AboutContent, Mission> = SectionLens {
    name: "mission",
    get: |d| &d.mission,
    get_mut: |d| &mut d.mission,
};

pub const STATS: CollectionLens<AboutContent, Stat> = CollectionLens {
    name: "stats",
    get: |d| &d.stats,
    get_mut: |d| &mut d.stats,
};

pub const VALUES: CollectionLens<AboutContent, CompanyValue> = CollectionLens {
    name: "values",
    get: |d| &d.values,
    get_mut: |d| &mut d.values,
};

pub const TEAM: CollectionLens<AboutContent, TeamMember> = CollectionLens {
    name: "team",
    get: |d| &d.team,
    get_mut: |d| &mut d.team,
};

impl ContentDocument for AboutContent {
    const DOMAIN: &'static str = "about";
    const STORAGE_KEY: &'static str = "about-content-storage";

    fn defaults() -> Self {
        Self {
            hero: Hero {
                title: "About Ofitsoft".to_string(),
                subtitle: "A small team shipping serious software".to_string(),
                description: "We partner with founders and product teams from idea to launch."
                    .to_string(),
                image_url: None,
            },
            mission: Mission {
                title: "Our Mission".to_string(),
                body: "Make dependable software accessible to growing businesses.".to_string(),
            },
            stats: vec![
                stat("stat-1", "Projects Delivered", "150+", Icon::Briefcase),
                stat("stat-2", "Happy Clients", "90+", Icon::Users),
                stat("stat-3", "Years in Business", "8", Icon::Award),
            ],
            values: vec![
                value("value-1", "Quality", "We test what we ship.", Icon::ShieldCheck),
                value("value-2", "Transparency", "No surprises on scope or cost.", Icon::Target),
                value("value-3", "Curiosity", "We keep learning.", Icon::Lightbulb),
            ],
            team: Vec::new(),
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

impl HasStatus for AboutContent {
    fn status(&self) -> ContentStatus {
        self.status
    }

    fn status_mut(&mut self) -> &mut ContentStatus {
        &mut self.status
    }
}

fn stat(id: &str, label: &str, value: &str, icon: Icon) -> Stat {
    Stat {
        id: id.to_string(),
        label: label.to_string(),
        value: value.to_string(),
        icon,
    }
}

fn value(id: &str, title: &str, description: &str, icon: Icon) -> CompanyValue {
    CompanyValue {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        icon,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops;

    fn member(id: &str) -> TeamMember {
        TeamMember {
            id: id.to_string(),
            name: "Ada".to_string(),
            role: "Engineer".to_string(),
            bio: String::new(),
            image_url: None,
            socials: Vec::new(),
        }
    }

    #[test]
    fn test_team_member_socials_are_scoped() {
        let mut doc = AboutContent::defaults();
        assert!(ops::add_entry(&mut doc, TEAM, member("member-1")));
        assert!(ops::add_entry(&mut doc, TEAM, member("member-2")));

        let link = SocialLink {
            id: "social-1".to_string(),
            icon: Icon::Github,
            href: "https://github.com/ada".to_string(),
            label: "GitHub".to_string(),
        };
        assert!(ops::add_nested_entry(&mut doc, TEAM, "member-1", link));
        assert_eq!(doc.team[0].socials.len(), 1);
        assert!(doc.team[1].socials.is_empty());

        assert!(ops::remove_entry(&mut doc, TEAM, "member-1"));
        assert_eq!(doc.team.len(), 1);
        assert_eq!(doc.team[0].id, "member-2");
    }

    #[test]
    fn test_publish_toggle() {
        let mut doc = AboutContent::defaults();
        assert!(ops::set_status(&mut doc, ContentStatus::Draft));
        assert_eq!(doc.status(), ContentStatus::Draft);
    }

    #[test]
    fn test_missing_status_defaults_to_draft() {
        let mut json = serde_json::to_value(AboutContent::defaults()).unwrap();
        json.as_object_mut().unwrap().remove("status");
        let doc: AboutContent = serde_json::from_value(json).unwrap();
        assert_eq!(doc.status, ContentStatus::Draft);
    }
}
