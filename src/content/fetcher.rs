//! Content fetcher - reads published posts from the Notion database
//!
//! Every operation is fail-soft: a missing setting, an HTTP failure or an
//! undecodable response is logged and turned into an empty result, so a
//! content-source outage never aborts page generation.

use std::sync::Arc;

use super::extract::{extract_post, PostSchema};
use super::{PostDetail, PostSummary};
use crate::config::{BlogConfig, NotionCredentials, NotionSettings, API_KEY_VAR, DATABASE_ID_VAR};
use crate::markdown::{MarkdownConverter, NotionToMarkdown};
use crate::notion::{DatabaseQuery, Filter, NotionClient, NotionError, Sort};

/// Reads posts from a Notion database
#[derive(Clone)]
pub struct ContentFetcher {
    client: Option<NotionClient>,
    database_id: Option<String>,
    schema: PostSchema,
    page_size: u32,
    converter: Option<Arc<dyn MarkdownConverter>>,
}

impl ContentFetcher {
    /// Create a fetcher. Missing credentials are accepted here and reported
    /// by each operation instead.
    pub fn new(settings: &NotionSettings, credentials: &NotionCredentials) -> Self {
        let client = credentials
            .api_key
            .as_deref()
            .map(|key| NotionClient::new(settings, key));
        let converter = client.clone().map(|client| {
            Arc::new(NotionToMarkdown::new(client, settings.page_size)) as Arc<dyn MarkdownConverter>
        });

        Self {
            client,
            database_id: credentials.database_id.clone(),
            schema: PostSchema::from(settings),
            page_size: settings.page_size,
            converter,
        }
    }

    /// Create a fetcher from the blog configuration
    pub fn from_config(config: &BlogConfig) -> Self {
        Self::new(&config.notion, &config.credentials)
    }

    /// Replace the Markdown converter
    pub fn with_converter(mut self, converter: Arc<dyn MarkdownConverter>) -> Self {
        self.converter = Some(converter);
        self
    }

    /// Published posts, newest first. Empty on any failure.
    pub async fn list_published(&self) -> Vec<PostSummary> {
        match self.try_list_published().await {
            Ok(posts) => {
                tracing::debug!("Fetched {} published posts", posts.len());
                posts
            }
            Err(e) => {
                log_failure("list_published", None, &e);
                Vec::new()
            }
        }
    }

    /// The published post with the given slug, if any
    pub async fn find_by_slug(&self, slug: &str) -> Option<PostSummary> {
        match self.try_find_by_slug(slug).await {
            Ok(post) => post,
            Err(e) => {
                log_failure("find_by_slug", Some(slug), &e);
                None
            }
        }
    }

    /// Markdown body of a page. Empty on any failure.
    pub async fn get_content(&self, page_id: &str) -> String {
        let result = match (&self.client, &self.converter) {
            (Some(_), Some(converter)) => converter.page_to_markdown(page_id).await,
            _ => Err(NotionError::MissingConfig(API_KEY_VAR)),
        };

        match result {
            Ok(content) => content,
            Err(e) => {
                log_failure("get_content", Some(page_id), &e);
                String::new()
            }
        }
    }

    /// Non-empty slugs of all published posts
    pub async fn list_all_slugs(&self) -> Vec<String> {
        self.list_published()
            .await
            .into_iter()
            .filter(PostSummary::is_routable)
            .map(|post| post.slug)
            .collect()
    }

    /// The published post with the given slug, including its body
    pub async fn get_post_detail(&self, slug: &str) -> Option<PostDetail> {
        let summary = self.find_by_slug(slug).await?;
        let content = self.get_content(&summary.id).await;
        Some(PostDetail::new(summary, content))
    }

    /// Client and database id, or the first missing setting
    fn database(&self) -> Result<(&NotionClient, &str), NotionError> {
        let database_id = self
            .database_id
            .as_deref()
            .ok_or(NotionError::MissingConfig(DATABASE_ID_VAR))?;
        let client = self
            .client
            .as_ref()
            .ok_or(NotionError::MissingConfig(API_KEY_VAR))?;
        Ok((client, database_id))
    }

    fn published_filter(&self) -> Filter {
        Filter::checkbox(&self.schema.properties.published, true)
    }

    async fn try_list_published(&self) -> Result<Vec<PostSummary>, NotionError> {
        let (client, database_id) = self.database()?;

        let mut query = DatabaseQuery {
            filter: Some(self.published_filter()),
            sorts: vec![Sort::descending(&self.schema.properties.published_date)],
            start_cursor: None,
            page_size: Some(self.page_size),
        };

        let mut posts = Vec::new();
        loop {
            let response = client.query_database(database_id, &query).await?;
            posts.extend(response.results.iter().map(|p| extract_post(p, &self.schema)));

            match response.continuation() {
                Some(cursor) if query.start_cursor.as_deref() == Some(cursor) => {
                    tracing::warn!("Cursor {:?} repeated in {}, stopping", cursor, database_id);
                    break;
                }
                Some(cursor) => query.start_cursor = Some(cursor.to_string()),
                None => break,
            }
        }

        Ok(posts)
    }

    async fn try_find_by_slug(&self, slug: &str) -> Result<Option<PostSummary>, NotionError> {
        let (client, database_id) = self.database()?;

        let query = DatabaseQuery {
            filter: Some(Filter::And {
                and: vec![
                    self.published_filter(),
                    Filter::rich_text(&self.schema.properties.slug, slug),
                ],
            }),
            ..Default::default()
        };

        let response = client.query_database(database_id, &query).await?;
        if response.results.len() > 1 {
            tracing::warn!(
                "{} published posts share slug {:?}, using the first",
                response.results.len(),
                slug
            );
        }

        Ok(response
            .results
            .first()
            .map(|page| extract_post(page, &self.schema)))
    }
}

impl std::fmt::Debug for ContentFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentFetcher")
            .field("client", &self.client)
            .field("database_id", &self.database_id)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

fn log_failure(operation: &str, target: Option<&str>, error: &NotionError) {
    let target = target.map(|t| format!(" ({})", t)).unwrap_or_default();
    match error {
        NotionError::MissingConfig(_) => {
            tracing::warn!("{}{}: {}. Set it in the environment.", operation, target, error)
        }
        _ => tracing::error!("{}{} failed: {}", operation, target, error),
    }
}
