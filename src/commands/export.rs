//! Export published posts as Markdown files

use anyhow::Result;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::{render_post, ContentFetcher, PostDetail, PostSummary};
use crate::NotionBlog;

/// Outcome of an export run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportStats {
    /// Files created or rewritten
    pub written: usize,
    /// Files already up to date
    pub unchanged: usize,
    /// Posts without a usable slug, or with a slug already exported
    pub skipped: usize,
}

impl ExportStats {
    pub fn summary(&self) -> String {
        format!(
            "{} written, {} unchanged, {} skipped",
            self.written, self.unchanged, self.skipped
        )
    }
}

/// Run the export command
pub async fn run(blog: &NotionBlog, out: Option<PathBuf>) -> Result<()> {
    let start = std::time::Instant::now();
    let dir = out.unwrap_or_else(|| blog.export_dir.clone());

    let stats = export_posts(&blog.fetcher(), &dir).await?;

    tracing::info!(
        "Exported to {:?} in {:.2}s: {}",
        dir,
        start.elapsed().as_secs_f64(),
        stats.summary()
    );
    println!("Exported posts: {}", stats.summary());
    Ok(())
}

/// Write every published post to `{dir}/{slug}.md`
pub async fn export_posts(fetcher: &ContentFetcher, dir: &Path) -> Result<ExportStats> {
    let posts = fetcher.list_published().await;
    tracing::info!("Exporting {} published posts", posts.len());

    fs::create_dir_all(dir)?;

    let mut stats = ExportStats::default();
    let mut seen = HashSet::new();

    for post in posts {
        if !post.is_routable() {
            tracing::warn!("Skipping {:?} ({}): no slug", post.title, post.id);
            stats.skipped += 1;
            continue;
        }

        let file_name = file_name(&post);
        if !seen.insert(file_name.clone()) {
            tracing::warn!(
                "Skipping {:?} ({}): {} was already exported",
                post.title,
                post.id,
                file_name
            );
            stats.skipped += 1;
            continue;
        }

        let content = fetcher.get_content(&post.id).await;
        let detail = PostDetail::new(post, content);
        let document = render_post(&detail)?;

        let path = dir.join(&file_name);
        if fs::read_to_string(&path).ok().as_deref() == Some(document.as_str()) {
            tracing::debug!("Unchanged: {:?}", path);
            stats.unchanged += 1;
            continue;
        }

        fs::write(&path, document)?;
        tracing::debug!("Wrote {:?}", path);
        stats.written += 1;
    }

    Ok(stats)
}

/// File name for a post, derived from its slug
fn file_name(post: &PostSummary) -> String {
    let stem = slug::slugify(&post.slug);
    if stem.is_empty() {
        format!("{}.md", post.id)
    } else {
        format!("{}.md", stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NotionCredentials;
    use crate::notion::testing::{block_json, list_json, page_json, FakeNotion};
    use serde_json::json;

    fn fetcher(fake: &FakeNotion) -> ContentFetcher {
        ContentFetcher::new(
            &fake.settings(),
            &NotionCredentials {
                api_key: Some("token".to_string()),
                database_id: Some("db".to_string()),
            },
        )
    }

    fn published(fake: &FakeNotion) {
        fake.push_query(
            200,
            list_json(
                vec![
                    page_json("p1", "Hello", "Hello World", Some("2024-01-02")),
                    page_json("p2", "No slug", "", None),
                    page_json("p3", "Dup", "hello-world", None),
                ],
                None,
            ),
        );
        fake.push_children(
            "p1",
            200,
            list_json(vec![block_json("b1", "paragraph", "Body", false)], None),
        );
    }

    #[tokio::test]
    async fn test_export_writes_documents() {
        let fake = FakeNotion::start().await;
        published(&fake);
        let dir = tempfile::tempdir().unwrap();

        let stats = export_posts(&fetcher(&fake), dir.path()).await.unwrap();
        assert_eq!(
            stats,
            ExportStats {
                written: 1,
                unchanged: 0,
                skipped: 2
            }
        );

        let doc = fs::read_to_string(dir.path().join("hello-world.md")).unwrap();
        assert!(doc.starts_with("---\ntitle: Hello\n"));
        assert!(doc.contains("notion_id: p1\n"));
        assert!(doc.ends_with("---\n\nBody\n"));
    }

    #[tokio::test]
    async fn test_second_export_is_unchanged() {
        let fake = FakeNotion::start().await;
        published(&fake);
        published(&fake);
        let dir = tempfile::tempdir().unwrap();
        let fetcher = fetcher(&fake);

        export_posts(&fetcher, dir.path()).await.unwrap();
        let stats = export_posts(&fetcher, dir.path()).await.unwrap();
        assert_eq!(stats.written, 0);
        assert_eq!(stats.unchanged, 1);
    }

    #[tokio::test]
    async fn test_export_with_unreachable_source_writes_nothing() {
        let fake = FakeNotion::start().await;
        fake.push_query(500, json!({}));
        let dir = tempfile::tempdir().unwrap();

        let stats = export_posts(&fetcher(&fake), dir.path()).await.unwrap();
        assert_eq!(stats, ExportStats::default());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_file_name_falls_back_to_id() {
        let mut post = PostSummary {
            id: "abc".to_string(),
            title: String::new(),
            slug: "!!!".to_string(),
            summary: String::new(),
            published_date: String::new(),
            category: String::new(),
            thumbnail: None,
        };
        assert_eq!(file_name(&post), "abc.md");

        post.slug = "Rust & Notion".to_string();
        assert_eq!(file_name(&post), "rust-notion.md");
    }
}
