//! Front-matter for exported posts

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::{PostDetail, PostSummary};
use crate::helpers;

/// Hexo-compatible front-matter written ahead of an exported post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontMatter {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub slug: String,
    pub notion_id: String,
}

impl FrontMatter {
    /// Build front-matter from a post
    pub fn from_post(post: &PostSummary) -> Self {
        Self {
            title: post.title.clone(),
            date: helpers::front_matter_date(&post.published_date),
            categories: vec![post.category.clone()],
            summary: Some(post.summary.clone()).filter(|s| !s.is_empty()),
            thumbnail: post.thumbnail.clone(),
            slug: post.slug.clone(),
            notion_id: post.id.clone(),
        }
    }

    /// Render a full Markdown document: `---`, YAML, `---`, body
    pub fn render(&self, body: &str) -> Result<String> {
        let yaml = serde_yaml::to_string(self)?;
        let body = body.trim();
        if body.is_empty() {
            Ok(format!("---\n{}---\n", yaml))
        } else {
            Ok(format!("---\n{}---\n\n{}\n", yaml, body))
        }
    }
}

/// Render an exported document for a post
pub fn render_post(post: &PostDetail) -> Result<String> {
    FrontMatter::from_post(&post.summary).render(&post.content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> PostDetail {
        PostDetail::new(
            PostSummary {
                id: "page-1".to_string(),
                title: "Hello: World".to_string(),
                slug: "hello".to_string(),
                summary: String::new(),
                published_date: "2024-01-15".to_string(),
                category: "Tech".to_string(),
                thumbnail: Some("https://x/y.png".to_string()),
            },
            "# Heading\n\nBody.\n".to_string(),
        )
    }

    #[test]
    fn test_render_post() {
        let doc = render_post(&post()).unwrap();
        assert!(doc.starts_with("---\n"));
        assert!(doc.ends_with("\n---\n\n# Heading\n\nBody.\n"));
        assert!(doc.contains("2024-01-15 00:00:00"));
        assert!(doc.contains("notion_id: page-1\n"));
        assert!(doc.contains("https://x/y.png"));
        assert!(!doc.contains("summary:"));
    }

    #[test]
    fn test_yaml_block_reads_back() {
        let doc = render_post(&post()).unwrap();
        let yaml = doc
            .strip_prefix("---\n")
            .and_then(|rest| rest.split("\n---\n").next())
            .unwrap();
        let fm: FrontMatter = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(fm.title, "Hello: World");
        assert_eq!(fm.categories, vec!["Tech"]);
    }

    #[test]
    fn test_empty_body() {
        let mut detail = post();
        detail.content = String::new();
        let doc = render_post(&detail).unwrap();
        assert!(doc.ends_with("---\n"));
        assert!(!doc.contains("\n\n\n"));
    }
}
