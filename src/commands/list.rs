//! List published posts

use anyhow::Result;

use crate::content::PostSummary;
use crate::NotionBlog;

/// List published posts, as text or JSON
pub async fn run(blog: &NotionBlog, json: bool) -> Result<()> {
    if !blog.config.credentials.is_complete() {
        println!("{}", setup_hint());
        return Ok(());
    }

    let posts = blog.fetcher().list_published().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
    } else if posts.is_empty() {
        println!("No published posts yet.");
        println!("Add a page to the Notion database and tick its Published checkbox.");
    } else {
        print!("{}", render_list(&posts, &blog.config.url));
    }

    Ok(())
}

/// Text listing: one line per post with date, title, category and URL
pub fn render_list(posts: &[PostSummary], base_url: &str) -> String {
    let mut out = format!("Posts ({}):\n", posts.len());
    for post in posts {
        let date = post.display_date();
        let date = if date.is_empty() { "----------" } else { &date };
        let location = if post.is_routable() {
            post.permalink(base_url)
        } else {
            "(no slug)".to_string()
        };
        out.push_str(&format!(
            "  {} - {} [{}] {}\n",
            date, post.title, post.category, location
        ));
    }
    out
}

/// Message shown when the Notion credentials are missing
pub fn setup_hint() -> String {
    format!(
        "Notion is not configured. Set these environment variables:\n  {}  - Notion integration token\n  {}  - Notion database id or URL",
        crate::config::API_KEY_VAR,
        crate::config::DATABASE_ID_VAR
    )
}
