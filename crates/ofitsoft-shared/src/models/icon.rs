use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Icons the site knows how to render, stored by name in content documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Icon {
    Facebook,
    Twitter,
    Linkedin,
    Instagram,
    Github,
    Youtube,
    #[default]
    Link2,
    Mail,
    Phone,
    MapPin,
    Globe,
    Code,
    Smartphone,
    Palette,
    Cloud,
    ShieldCheck,
    TrendingUp,
    Users,
    Award,
    Target,
    Heart,
    Lightbulb,
    Rocket,
    Briefcase,
}

impl Icon {
    pub const ALL: [Icon; 24] = [
        Icon::Facebook,
        Icon::Twitter,
        Icon::Linkedin,
        Icon::Instagram,
        Icon::Github,
        Icon::Youtube,
        Icon::Link2,
        Icon::Mail,
        Icon::Phone,
        Icon::MapPin,
        Icon::Globe,
        Icon::Code,
        Icon::Smartphone,
        Icon::Palette,
        Icon::Cloud,
        Icon::ShieldCheck,
        Icon::TrendingUp,
        Icon::Users,
        Icon::Award,
        Icon::Target,
        Icon::Heart,
        Icon::Lightbulb,
        Icon::Rocket,
        Icon::Briefcase,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Icon::Facebook => "Facebook",
            Icon::Twitter => "Twitter",
            Icon::Linkedin => "Linkedin",
            Icon::Instagram => "Instagram",
            Icon::Github => "Github",
            Icon::Youtube => "Youtube",
            Icon::Link2 => "Link2",
            Icon::Mail => "Mail",
            Icon::Phone => "Phone",
            Icon::MapPin => "MapPin",
            Icon::Globe => "Globe",
            Icon::Code => "Code",
            Icon::Smartphone => "Smartphone",
            Icon::Palette => "Palette",
            Icon::Cloud => "Cloud",
            Icon::ShieldCheck => "ShieldCheck",
            Icon::TrendingUp => "TrendingUp",
            Icon::Users => "Users",
            Icon::Award => "Award",
            Icon::Target => "Target",
            Icon::Heart => "Heart",
            Icon::Lightbulb => "Lightbulb",
            Icon::Rocket => "Rocket",
            Icon::Briefcase => "Briefcase",
        }
    }

    /// Exact-name lookup.
    pub fn from_name(name: &str) -> Option<Icon> {
        Icon::ALL.into_iter().find(|icon| icon.name() == name)
    }
}

/// Unknown names fall back to the generic link icon.
impl From<String> for Icon {
    fn from(name: String) -> Self {
        Icon::from_name(&name).unwrap_or_default()
    }
}

impl From<Icon> for String {
    fn from(icon: Icon) -> Self {
        icon.name().to_string()
    }
}

/// Strict parse for user input, case-insensitive.
impl FromStr for Icon {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Icon::ALL
            .into_iter()
            .find(|icon| icon.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown icon '{}'", s))
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for icon in Icon::ALL {
            assert_eq!(Icon::from_name(icon.name()), Some(icon));
        }
    }

    #[test]
    fn test_serializes_as_name() {
        assert_eq!(serde_json::to_string(&Icon::MapPin).unwrap(), "\"MapPin\"");
        let icon: Icon = serde_json::from_str("\"Github\"").unwrap();
        assert_eq!(icon, Icon::Github);
    }

    #[test]
    fn test_from_str_is_strict() {
        assert_eq!("mappin".parse::<Icon>(), Ok(Icon::MapPin));
        assert!("Sparkles".parse::<Icon>().is_err());
    }

    #[test]
    fn test_unknown_name_falls_back() {
        let icon: Icon = serde_json::from_str("\"Sparkles\"").unwrap();
        assert_eq!(icon, Icon::Link2);
    }
}
