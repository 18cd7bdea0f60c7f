//! Markdown conversion of page bodies

mod block;
mod notion;
mod rich_text;

use async_trait::async_trait;

pub use block::{blocks_to_md, to_markdown_string, BlockNode, MdBlock};
pub use notion::NotionToMarkdown;
pub use rich_text::rich_text_to_markdown;

use crate::notion::Result;

/// Turns a page's body into one Markdown document
#[async_trait]
pub trait MarkdownConverter: Send + Sync {
    async fn page_to_markdown(&self, page_id: &str) -> Result<String>;
}
