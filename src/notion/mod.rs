//! Notion API access: HTTP client, object model and id handling

mod client;
mod id;
mod model;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{NotionClient, NotionError, Result};
pub use id::normalize_id;
pub use model::{
    plain_text, Annotations, Block, BlockData, Condition, DatabaseQuery, DateValue, Direction,
    FileObject, FileUrl, Filter, Icon, Page, Paginated, PropertyValue, RichText, SelectOption,
    Sort,
};
