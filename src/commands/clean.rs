//! Remove exported posts

use anyhow::Result;
use std::fs;

use crate::NotionBlog;

/// Delete the export directory
pub fn run(blog: &NotionBlog) -> Result<()> {
    if blog.export_dir.exists() {
        fs::remove_dir_all(&blog.export_dir)?;
        tracing::info!("Deleted: {:?}", blog.export_dir);
    }

    Ok(())
}
