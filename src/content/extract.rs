//! Property extraction: Notion page -> PostSummary
//!
//! Every field is read independently and falls back to its own default, so
//! a page with missing or mistyped properties still produces a post.

use super::PostSummary;
use crate::config::{NotionSettings, PropertyNames};
use crate::notion::{Page, PropertyValue, RichText};

/// Property names and fallback values used when reading a page
#[derive(Debug, Clone, PartialEq)]
pub struct PostSchema {
    pub properties: PropertyNames,
    pub default_title: String,
    pub default_category: String,
}

impl Default for PostSchema {
    fn default() -> Self {
        Self::from(&NotionSettings::default())
    }
}

impl From<&NotionSettings> for PostSchema {
    fn from(settings: &NotionSettings) -> Self {
        Self {
            properties: settings.properties.clone(),
            default_title: settings.default_title.clone(),
            default_category: settings.default_category.clone(),
        }
    }
}

/// Map a page to a post summary. Never fails.
pub fn extract_post(page: &Page, schema: &PostSchema) -> PostSummary {
    let names = &schema.properties;

    let title = match page.property(&names.title) {
        Some(PropertyValue::Title(runs)) => first_run(runs),
        _ => None,
    }
    .unwrap_or_else(|| schema.default_title.clone());

    let slug = rich_text(page, &names.slug).unwrap_or_default();
    let summary = rich_text(page, &names.summary).unwrap_or_default();

    let published_date = match page.property(&names.published_date) {
        Some(PropertyValue::Date(Some(date))) => date.start.clone(),
        _ => None,
    }
    .unwrap_or_default();

    let category = match page.property(&names.category) {
        Some(PropertyValue::Select(Some(option))) => Some(option.name.clone()),
        _ => None,
    }
    .unwrap_or_else(|| schema.default_category.clone());

    let thumbnail = match page.property(&names.files) {
        Some(PropertyValue::Files(files)) => files.first().and_then(|f| f.url()).map(str::to_string),
        _ => None,
    };

    PostSummary {
        id: page.id.clone(),
        title,
        slug,
        summary,
        published_date,
        category,
        thumbnail,
    }
}

/// Extract with the default property layout
pub fn extract_post_data(page: &Page) -> PostSummary {
    extract_post(page, &PostSchema::default())
}

fn rich_text(page: &Page, name: &str) -> Option<String> {
    match page.property(name) {
        Some(PropertyValue::RichText(runs)) => first_run(runs),
        _ => None,
    }
}

/// Plain text of the first run; an empty list yields `None`
fn first_run(runs: &[RichText]) -> Option<String> {
    runs.first().map(|run| run.plain_text.clone())
}
