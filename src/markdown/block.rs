//! Block tree to Markdown
//!
//! Conversion happens in two steps: fetched [`BlockNode`]s become an
//! intermediate [`MdBlock`] tree where each node holds its own Markdown,
//! then [`to_markdown_string`] lays the tree out with nesting and spacing.

use serde::Serialize;

use super::rich_text::rich_text_to_markdown;
use crate::notion::{plain_text, Block, BlockData};

/// A fetched block together with its fetched children
#[derive(Debug, Clone, Default)]
pub struct BlockNode {
    pub block: Block,
    pub children: Vec<BlockNode>,
}

/// Intermediate Markdown tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MdBlock {
    /// Notion block type this node came from
    pub block_type: String,
    /// Markdown of the block itself, without its children
    pub parent: String,
    pub children: Vec<MdBlock>,
}

/// Convert sibling blocks into Markdown nodes
pub fn blocks_to_md(nodes: &[BlockNode]) -> Vec<MdBlock> {
    let mut out = Vec::with_capacity(nodes.len());
    let mut number = 0;

    for node in nodes {
        if node.block.block_type == "numbered_list_item" {
            number += 1;
        } else {
            number = 0;
        }
        if let Some(md) = node_to_md(node, number) {
            out.push(md);
        }
    }

    out
}

fn node_to_md(node: &BlockNode, number: usize) -> Option<MdBlock> {
    let block_type = node.block.block_type.as_str();
    let data = node.block.data();
    let text = rich_text_to_markdown(&data.rich_text);

    let parent = match block_type {
        "paragraph" | "toggle" => text,
        "heading_1" => format!("# {}", text),
        "heading_2" => format!("## {}", text),
        "heading_3" => format!("### {}", text),
        "bulleted_list_item" => format!("- {}", text),
        "numbered_list_item" => format!("{}. {}", number, text),
        "to_do" => format!("- [{}] {}", if data.checked { 'x' } else { ' ' }, text),
        "quote" => prefix_lines(&text, "> "),
        "callout" => {
            let text = match data.icon.as_ref().and_then(|i| i.emoji.as_deref()) {
                Some(emoji) => format!("{} {}", emoji, text),
                None => text,
            };
            prefix_lines(&text, "> ")
        }
        "code" => format!(
            "```{}\n{}\n```",
            code_language(&data.language),
            plain_text(&data.rich_text)
        ),
        "equation" => format!("$$\n{}\n$$", data.expression),
        "divider" => "---".to_string(),
        "image" => match data.media_url() {
            Some(url) => format!("![{}]({})", plain_text(&data.caption), url),
            None => return None,
        },
        "video" | "audio" | "file" | "pdf" | "embed" | "bookmark" | "link_preview" => {
            match data.media_url() {
                Some(url) => format!("[{}]({})", link_label(&data, url), url),
                None => return None,
            }
        }
        "table" => {
            return Some(MdBlock {
                block_type: block_type.to_string(),
                parent: table_to_markdown(&node.children),
                children: Vec::new(),
            })
        }
        // Sub-pages are separate documents
        "child_page" => return None,
        "child_database" => format!("**{}**", data.title),
        "column_list" | "column" | "synced_block" => String::new(),
        other => {
            tracing::debug!("Skipping unsupported block type {:?}", other);
            return None;
        }
    };

    Some(MdBlock {
        block_type: block_type.to_string(),
        parent,
        children: blocks_to_md(&node.children),
    })
}

/// Serialize a Markdown tree into one document
pub fn to_markdown_string(blocks: &[MdBlock]) -> String {
    render_blocks(blocks)
}

fn render_blocks(blocks: &[MdBlock]) -> String {
    let mut out = String::new();
    let mut previous: Option<&str> = None;

    for block in blocks {
        let rendered = render_block(block);
        if rendered.trim().is_empty() {
            continue;
        }
        if let Some(prev) = previous {
            let tight = is_list_item(prev) && prev == block.block_type;
            out.push_str(if tight { "\n" } else { "\n\n" });
        }
        out.push_str(&rendered);
        previous = Some(block.block_type.as_str());
    }

    out
}

fn render_block(block: &MdBlock) -> String {
    let children = render_blocks(&block.children);

    if block.block_type == "toggle" {
        let body = if children.is_empty() {
            String::new()
        } else {
            format!("{}\n\n", children)
        };
        return format!(
            "<details>\n<summary>{}</summary>\n\n{}</details>",
            block.parent, body
        );
    }

    if children.is_empty() {
        return block.parent.clone();
    }
    if block.parent.is_empty() {
        return children;
    }

    match block.block_type.as_str() {
        t if is_list_item(t) => format!("{}\n{}", block.parent, indent(&children)),
        "quote" | "callout" => format!(
            "{}\n>\n{}",
            block.parent,
            prefix_lines(&children, "> ")
        ),
        _ => format!("{}\n\n{}", block.parent, children),
    }
}

fn is_list_item(block_type: &str) -> bool {
    matches!(
        block_type,
        "bulleted_list_item" | "numbered_list_item" | "to_do"
    )
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("    {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn prefix_lines(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                prefix.trim_end().to_string()
            } else {
                format!("{}{}", prefix, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Notion uses "plain text" for unhighlighted code
fn code_language(language: &str) -> &str {
    match language {
        "plain text" => "",
        other => other,
    }
}

fn link_label<'a>(data: &'a BlockData, url: &'a str) -> std::borrow::Cow<'a, str> {
    let caption = plain_text(&data.caption);
    if !caption.is_empty() {
        caption.into()
    } else if !data.name.is_empty() {
        data.name.as_str().into()
    } else {
        url.into()
    }
}

/// Render table rows as a GFM table. The first row is the header.
fn table_to_markdown(rows: &[BlockNode]) -> String {
    let rows: Vec<Vec<String>> = rows
        .iter()
        .filter(|row| row.block.block_type == "table_row")
        .map(|row| {
            row.block
                .data()
                .cells
                .iter()
                .map(|cell| rich_text_to_markdown(cell).replace('|', "\\|"))
                .collect()
        })
        .collect();

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if width == 0 {
        return String::new();
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    for (i, row) in rows.iter().enumerate() {
        let mut cells = row.clone();
        cells.resize(width, String::new());
        lines.push(format!("| {} |", cells.join(" | ")));
        if i == 0 {
            lines.push(format!("| {} |", vec!["---"; width].join(" | ")));
        }
    }
    lines.join("\n")
}
