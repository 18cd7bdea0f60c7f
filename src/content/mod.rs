//! Content module - post models, property extraction and fetching

mod extract;
mod fetcher;
mod frontmatter;
mod post;

pub use extract::{extract_post, extract_post_data, PostSchema};
pub use fetcher::ContentFetcher;
pub use frontmatter::{render_post, FrontMatter};
pub use post::{PostDetail, PostSummary};
