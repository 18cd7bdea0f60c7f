//! Notion page body to Markdown

use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;

use super::block::{blocks_to_md, to_markdown_string, BlockNode, MdBlock};
use super::MarkdownConverter;
use crate::notion::{Block, NotionClient, Result};

/// Block types whose children are not part of the page body
const OPAQUE_BLOCKS: &[&str] = &["child_page", "child_database", "unsupported"];

type TreeFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<BlockNode>>> + Send + 'a>>;

/// Fetches a page's block tree through the Notion API and renders it
#[derive(Debug, Clone)]
pub struct NotionToMarkdown {
    client: NotionClient,
    page_size: u32,
}

impl NotionToMarkdown {
    pub fn new(client: NotionClient, page_size: u32) -> Self {
        Self { client, page_size }
    }

    /// Fetch the page body as an intermediate Markdown tree
    pub async fn page_to_md_blocks(&self, page_id: &str) -> Result<Vec<MdBlock>> {
        let tree = self.fetch_tree(page_id).await?;
        Ok(blocks_to_md(&tree))
    }

    /// Fetch all children of a block, descending into nested blocks
    fn fetch_tree<'a>(&'a self, block_id: &'a str) -> TreeFuture<'a> {
        Box::pin(async move {
            let blocks = self.list_children(block_id).await?;
            let mut nodes = Vec::with_capacity(blocks.len());

            for block in blocks {
                let children = if block.has_children
                    && !OPAQUE_BLOCKS.contains(&block.block_type.as_str())
                {
                    self.fetch_tree(&block.id).await?
                } else {
                    Vec::new()
                };
                nodes.push(BlockNode { block, children });
            }

            Ok(nodes)
        })
    }

    async fn list_children(&self, block_id: &str) -> Result<Vec<Block>> {
        let mut blocks = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = self
                .client
                .block_children(block_id, cursor.as_deref(), self.page_size)
                .await?;
            let next = page.continuation().map(str::to_string);
            blocks.extend(page.results);
            if next.is_none() || next == cursor {
                if next.is_some() {
                    tracing::warn!("Cursor {:?} repeated under {}, stopping", next, block_id);
                }
                break;
            }
            cursor = next;
        }

        tracing::debug!("Fetched {} blocks under {}", blocks.len(), block_id);
        Ok(blocks)
    }
}

#[async_trait]
impl MarkdownConverter for NotionToMarkdown {
    async fn page_to_markdown(&self, page_id: &str) -> Result<String> {
        let blocks = self.page_to_md_blocks(page_id).await?;
        Ok(to_markdown_string(&blocks))
    }
}
