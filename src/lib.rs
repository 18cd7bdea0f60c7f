//! notion-blog: a blog content layer backed by a Notion database
//!
//! Published pages of a Notion database are fetched, mapped to flat post
//! records and their bodies converted to Markdown. The CLI lists posts,
//! prints single posts and exports them as Hexo-style Markdown files.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod markdown;
pub mod notion;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use content::{ContentFetcher, PostDetail, PostSummary};

/// Name of the configuration file in the base directory
pub const CONFIG_FILE: &str = "_config.yml";

/// The main blog application
#[derive(Debug, Clone)]
pub struct NotionBlog {
    /// Blog configuration, including credentials from the environment
    pub config: config::BlogConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory exported posts are written to
    pub export_dir: PathBuf,
}

impl NotionBlog {
    /// Create a blog instance from a directory, reading `_config.yml` when
    /// present and the environment for secrets
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config_path = base_dir.as_ref().join(CONFIG_FILE);

        let mut config = if config_path.exists() {
            config::BlogConfig::load(&config_path)?
        } else {
            config::BlogConfig::default()
        };
        config.apply_env();

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a blog instance with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::BlogConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let export_dir = base_dir.join(&config.export_dir);

        Self {
            config,
            base_dir,
            export_dir,
        }
    }

    /// Content fetcher for the configured database
    pub fn fetcher(&self) -> ContentFetcher {
        ContentFetcher::from_config(&self.config)
    }

    /// Export published posts to the export directory
    pub async fn export(&self) -> Result<commands::export::ExportStats> {
        commands::export::export_posts(&self.fetcher(), &self.export_dir).await
    }

    /// Remove exported posts
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
