//! Print one post

use anyhow::Result;

use crate::content::render_post;
use crate::NotionBlog;

/// Print the post with the given slug as a Markdown document or JSON
pub async fn run(blog: &NotionBlog, slug: &str, json: bool) -> Result<()> {
    let Some(post) = blog.fetcher().get_post_detail(slug).await else {
        anyhow::bail!("Post not found: {}", slug);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&post)?);
    } else {
        print!("{}", render_post(&post)?);
    }

    Ok(())
}
