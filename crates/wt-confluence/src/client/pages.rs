//! Page fetch operations.

use tracing::info;
use wt_config::ImageStripPolicy;

use super::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::page::normalize_page;
use crate::types::{PageRecord, RawPage};

impl ConfluenceClient {
    /// Get a page by ID with its rendered body expanded.
    pub fn get_page_raw(&self, page_id: &str) -> Result<RawPage, ConfluenceError> {
        let url = format!("{}/content/{}", self.api_url(), page_id);

        info!("Getting page {}", page_id);

        self.get_json(&url, &[("expand", "body.view"), ("include-version", "false")])
    }

    /// Fetch a page and normalize it into a [`PageRecord`].
    pub fn fetch_page(
        &self,
        page_id: &str,
        policy: ImageStripPolicy,
    ) -> Result<PageRecord, ConfluenceError> {
        let raw = self.get_page_raw(page_id)?;
        normalize_page(&raw, &self.base_url, policy)
    }
}
