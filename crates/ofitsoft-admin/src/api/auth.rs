use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl AuthTokens {
    /// Get the path to the auth token file
    fn token_path(home: &Path) -> PathBuf {
        home.join("auth.json")
    }

    /// Load tokens from disk
    pub fn load(home: &Path) -> Result<Option<Self>> {
        let path = Self::token_path(home);

        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path).context("Could not read auth file")?;

        let tokens: Self = serde_json::from_str(&contents).context("Could not parse auth file")?;

        Ok(Some(tokens))
    }

    /// Save tokens to disk
    pub fn save(&self, home: &Path) -> Result<()> {
        fs::create_dir_all(home).context("Could not create config directory")?;

        let contents = serde_json::to_string_pretty(self).context("Could not serialize tokens")?;

        fs::write(Self::token_path(home), contents).context("Could not write auth file")?;

        Ok(())
    }

    /// Delete stored tokens
    pub fn delete(home: &Path) -> Result<()> {
        let path = Self::token_path(home);

        if path.exists() {
            fs::remove_file(&path).context("Could not delete auth file")?;
        }

        Ok(())
    }

    /// True when the token expires within the next minute
    pub fn is_expiring(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now + Duration::seconds(60)
    }
}
