//! Print routing keys of all published posts

use anyhow::Result;

use crate::NotionBlog;

/// Print one slug per line
pub async fn run(blog: &NotionBlog) -> Result<()> {
    for slug in blog.fetcher().list_all_slugs().await {
        println!("{}", slug);
    }
    Ok(())
}
