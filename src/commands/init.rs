//! Initialize a new blog directory

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::BlogConfig;
use crate::CONFIG_FILE;

const CONFIG_TEMPLATE: &str = r#"# Notion blog configuration
## Secrets are read from the environment only:
##   NOTION_API_KEY      Notion integration token
##   NOTION_DATABASE_ID  database id or URL
##   BLOG_BASE_URL       overrides `url` below

# Site
title: Notion Blog
description: ''

# URL
url: http://localhost:3000

# Directory
export_dir: source/_posts

# Notion
notion:
  api_base_url: https://api.notion.com/v1
  api_version: '2022-06-28'
  page_size: 100
  default_title: untitled
  default_category: uncategorized
  properties:
    title: Name
    slug: Slug
    summary: Summary
    published_date: Published Date
    category: Category
    files: Files
    published: Published
"#;

/// Initialize a blog in the given directory
pub fn init_blog(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("File already exists: {:?}", config_path);
    }

    fs::create_dir_all(target_dir)?;
    fs::write(&config_path, CONFIG_TEMPLATE)?;

    let config = BlogConfig::load(&config_path)?;
    fs::create_dir_all(target_dir.join(&config.export_dir))?;

    Ok(())
}
