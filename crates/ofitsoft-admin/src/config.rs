use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::store::{FileCache, WritePolicy};

const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Content API
    pub api_url: String,
    /// State directory holding the content cache and the login token
    pub home: PathBuf,
    /// When stores write their cache entry
    pub write_policy: WritePolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from a variable lookup: `OFITSOFT_API_URL`, `OFITSOFT_HOME`,
    /// `OFITSOFT_WRITE_POLICY`.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = var("OFITSOFT_API_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let home = match var("OFITSOFT_HOME").filter(|dir| !dir.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .context("Could not find config directory, set OFITSOFT_HOME")?
                .join("ofitsoft"),
        };

        let write_policy = match var("OFITSOFT_WRITE_POLICY").filter(|p| !p.trim().is_empty()) {
            Some(policy) => policy
                .trim()
                .parse()
                .map_err(|e: String| anyhow::anyhow!("OFITSOFT_WRITE_POLICY: {}", e))?,
            None => WritePolicy::default(),
        };

        Ok(Self {
            api_url,
            home,
            write_policy,
        })
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn cache(&self) -> FileCache {
        FileCache::new(self.home.join("content"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_vars(vars(&[
            ("OFITSOFT_API_URL", "https://cms.ofitsoft.com"),
            ("OFITSOFT_HOME", "/tmp/ofitsoft-test"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "https://cms.ofitsoft.com");
        assert_eq!(config.home(), Path::new("/tmp/ofitsoft-test"));
        assert_eq!(
            config.cache().dir(),
            Path::new("/tmp/ofitsoft-test/content")
        );
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = Config::from_vars(vars(&[
            ("OFITSOFT_API_URL", " "),
            ("OFITSOFT_HOME", "/tmp/x"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.write_policy, WritePolicy::WriteThrough);
    }

    #[test]
    fn test_write_policy_from_env() {
        let config = Config::from_vars(vars(&[
            ("OFITSOFT_HOME", "/tmp/x"),
            ("OFITSOFT_WRITE_POLICY", "manual"),
        ]))
        .unwrap();
        assert_eq!(config.write_policy, WritePolicy::Manual);

        let err = Config::from_vars(vars(&[
            ("OFITSOFT_HOME", "/tmp/x"),
            ("OFITSOFT_WRITE_POLICY", "sometimes"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("OFITSOFT_WRITE_POLICY"));
    }
}
