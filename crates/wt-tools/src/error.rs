//! Tool-level error taxonomy.
//!
//! Errors stay structured up to the entry-point boundary, where they are
//! converted into the host's string contract (`"Error: <message>"`).

use wt_confluence::ConfluenceError;

/// Error raised inside a tool invocation.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Missing or invalid credentials; never reaches the remote API.
    #[error("{0}")]
    Validation(String),

    /// Remote call failed or returned an unusable payload.
    #[error("{0}")]
    Remote(#[from] ConfluenceError),
}

impl From<wt_config::ConfigError> for ToolError {
    fn from(e: wt_config::ConfigError) -> Self {
        ToolError::Validation(e.to_string())
    }
}
