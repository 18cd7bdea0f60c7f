//! Post models

use serde::{Deserialize, Serialize};
use std::ops::Deref;

use crate::helpers;

/// A published post as listed on the index page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    /// Notion page id
    pub id: String,

    /// Post title
    pub title: String,

    /// Routing key, empty when the page has none
    pub slug: String,

    /// Short description
    pub summary: String,

    /// Publication date as stored in Notion (ISO 8601), empty when unset
    pub published_date: String,

    /// Category name
    pub category: String,

    /// Thumbnail URL from the first attached file
    pub thumbnail: Option<String>,
}

impl PostSummary {
    /// Whether the post can be reached through slug routing
    pub fn is_routable(&self) -> bool {
        !self.slug.is_empty()
    }

    /// Site-relative path of the post's detail page
    pub fn path(&self) -> String {
        helpers::post_path(&self.slug)
    }

    /// Absolute URL of the post's detail page
    pub fn permalink(&self, base_url: &str) -> String {
        helpers::full_url_for(base_url, &self.path())
    }

    /// Publication date as `YYYY-MM-DD`, empty when unset or unparseable
    pub fn display_date(&self) -> String {
        helpers::display_date(&self.published_date)
    }
}

/// A post with its Markdown body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub summary: PostSummary,

    /// Markdown rendering of the page body
    pub content: String,
}

impl PostDetail {
    pub fn new(summary: PostSummary, content: String) -> Self {
        Self { summary, content }
    }
}

impl Deref for PostDetail {
    type Target = PostSummary;

    fn deref(&self) -> &PostSummary {
        &self.summary
    }
}
