use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LeaderboardError, Result};

/// Organisation shown in headings and footers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrgConfig {
    pub name: String,
    pub description: String,
    pub logo_url: Option<String>,
    pub socials: Socials,
}

impl Default for OrgConfig {
    fn default() -> Self {
        Self {
            name: "Open Source".to_string(),
            description: String::new(),
            logo_url: None,
            socials: Socials::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Socials {
    pub github: Option<String>,
    pub email: Option<String>,
}

/// Page metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaConfig {
    pub title: String,
    pub description: String,
    pub site_url: Option<String>,
    pub image_url: Option<String>,
    pub favicon_url: Option<String>,
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            title: "Contributor Leaderboard".to_string(),
            description: String::new(),
            site_url: None,
            image_url: None,
            favicon_url: None,
        }
    }
}

/// Leaderboard presentation options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardConfig {
    /// Roles left out of the default role selection.
    pub hidden_roles: Vec<String>,
}

/// Site configuration, passed explicitly to whatever renders output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub org: OrgConfig,
    pub meta: MetaConfig,
    pub leaderboard: LeaderboardConfig,
}

impl SiteConfig {
    /// Load the config at `path`.
    ///
    /// A missing file yields the defaults; a file that exists but does not
    /// parse is a [`LeaderboardError::Config`].
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| LeaderboardError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content)
            .map_err(|e| LeaderboardError::Config(format!("{}: {}", path.display(), e)))
    }

    /// `"<section> - <site title>"`, used for page headings.
    pub fn page_title(&self, section: &str) -> String {
        format!("{} - {}", section, self.meta.title)
    }
}
