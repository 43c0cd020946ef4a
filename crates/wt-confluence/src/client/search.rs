//! Content search operation.

use tracing::info;

use super::ConfluenceClient;
use crate::cql::{SearchQuery, build_cql};
use crate::error::ConfluenceError;
use crate::types::SearchResults;

impl ConfluenceClient {
    /// Search page-type content, returning matching page IDs in API order.
    ///
    /// The order is preserved downstream so citations come out
    /// deterministically.
    pub fn search(&self, query: &SearchQuery) -> Result<Vec<String>, ConfluenceError> {
        let url = format!("{}/content/search", self.api_url());
        let cql = build_cql(query);
        let limit = query.limit.to_string();

        info!("Searching content (limit {})", query.limit);

        let results: SearchResults =
            self.get_json(&url, &[("cql", cql.as_str()), ("limit", limit.as_str())])?;
        Ok(results.results.into_iter().map(|hit| hit.id).collect())
    }
}
