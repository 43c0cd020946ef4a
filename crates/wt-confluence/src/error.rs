//! Error types for the Confluence client.

/// Error from Confluence API operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfluenceError {
    /// HTTP request error. Transport failures carry `status: 0` with the
    /// error text as the body.
    #[error("HTTP error: {status} - {body}")]
    Http {
        /// HTTP status code (0 for transport failures).
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// The API response is missing a field the page normalizer requires.
    #[error("unexpected API response shape: missing {field}")]
    UnexpectedShape {
        /// Dotted path of the missing field (e.g. `_links.webui`).
        field: &'static str,
    },

    /// Page body could not be converted to markdown.
    #[error("HTML conversion error: {0}")]
    Convert(#[from] wt_markdown::ConvertError),
}

impl From<serde_json::Error> for ConfluenceError {
    fn from(e: serde_json::Error) -> Self {
        ConfluenceError::Json(e.to_string())
    }
}

impl From<ureq::Error> for ConfluenceError {
    fn from(e: ureq::Error) -> Self {
        ConfluenceError::Http {
            status: 0,
            body: e.to_string(),
        }
    }
}
