//! Page retrieval seam.

use wt_config::{Credentials, ImageStripPolicy, ToolConfig};
use wt_confluence::{ConfluenceClient, ConfluenceError, PageRecord, SearchQuery};

/// Search-and-fetch interface the tool flows run against.
///
/// The production implementation wraps a [`ConfluenceClient`]; tests
/// substitute an in-memory fake.
pub trait PageProvider {
    /// Search for pages, returning IDs in result order.
    fn search_ids(&self, query: &SearchQuery) -> Result<Vec<String>, ConfluenceError>;

    /// Fetch and normalize one page.
    fn fetch_page(&self, page_id: &str) -> Result<PageRecord, ConfluenceError>;
}

/// [`PageProvider`] backed by the Confluence REST API.
pub struct ConfluenceProvider {
    client: ConfluenceClient,
    policy: ImageStripPolicy,
}

impl ConfluenceProvider {
    /// Build a provider for one tool invocation.
    pub fn new(config: &ToolConfig, credentials: &Credentials) -> Self {
        Self {
            client: ConfluenceClient::from_config(config, credentials),
            policy: config.strip_images,
        }
    }
}

impl PageProvider for ConfluenceProvider {
    fn search_ids(&self, query: &SearchQuery) -> Result<Vec<String>, ConfluenceError> {
        self.client.search(query)
    }

    fn fetch_page(&self, page_id: &str) -> Result<PageRecord, ConfluenceError> {
        self.client.fetch_page(page_id, self.policy)
    }
}
