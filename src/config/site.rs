//! Blog configuration (_config.yml plus environment)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::notion::normalize_id;

/// Environment variable holding the Notion integration token
pub const API_KEY_VAR: &str = "NOTION_API_KEY";
/// Environment variable holding the Notion database id
pub const DATABASE_ID_VAR: &str = "NOTION_DATABASE_ID";
/// Environment variable overriding the public base URL
pub const BASE_URL_VAR: &str = "BLOG_BASE_URL";

/// Main blog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    // Site
    pub title: String,
    pub description: String,

    // URL
    pub url: String,

    // Directory
    pub export_dir: String,

    // Content source
    pub notion: NotionSettings,

    /// Secrets, only ever read from the environment
    #[serde(skip)]
    pub credentials: NotionCredentials,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            title: "Notion Blog".to_string(),
            description: String::new(),
            url: "http://localhost:3000".to_string(),
            export_dir: "source/_posts".to_string(),
            notion: NotionSettings::default(),
            credentials: NotionCredentials::default(),
        }
    }
}

impl BlogConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: BlogConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Overlay values from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Overlay values from an environment lookup. Empty values count as unset.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        self.credentials = NotionCredentials {
            api_key: get(API_KEY_VAR),
            database_id: get(DATABASE_ID_VAR).map(|id| normalize_id(&id)),
        };

        if let Some(url) = get(BASE_URL_VAR) {
            self.url = url;
        }
    }
}

/// Notion API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotionSettings {
    pub api_base_url: String,
    pub api_version: String,
    pub page_size: u32,
    pub properties: PropertyNames,
    pub default_title: String,
    pub default_category: String,
}

impl Default for NotionSettings {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.notion.com/v1".to_string(),
            api_version: "2022-06-28".to_string(),
            page_size: 100,
            properties: PropertyNames::default(),
            default_title: "untitled".to_string(),
            default_category: "uncategorized".to_string(),
        }
    }
}

/// Names of the database properties the blog reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyNames {
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub published_date: String,
    pub category: String,
    pub files: String,
    pub published: String,
}

impl Default for PropertyNames {
    fn default() -> Self {
        Self {
            title: "Name".to_string(),
            slug: "Slug".to_string(),
            summary: "Summary".to_string(),
            published_date: "Published Date".to_string(),
            category: "Category".to_string(),
            files: "Files".to_string(),
            published: "Published".to_string(),
        }
    }
}

/// Notion secrets
#[derive(Clone, Default)]
pub struct NotionCredentials {
    pub api_key: Option<String>,
    pub database_id: Option<String>,
}

impl NotionCredentials {
    /// Whether every value needed for a database query is present
    pub fn is_complete(&self) -> bool {
        self.api_key.is_some() && self.database_id.is_some()
    }
}

impl std::fmt::Debug for NotionCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionCredentials")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("database_id", &self.database_id)
            .finish()
    }
}
