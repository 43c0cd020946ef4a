//! Confluence integration for wikitool.
//!
//! This crate provides the remote half of the tool pipeline:
//! - [`ConfluenceClient`]: REST API client with Basic/Bearer authentication
//! - [`cql`]: search-expression building
//! - [`normalize_page`]: raw page payload to [`PageRecord`] conversion
//!
//! # API Client
//!
//! ```ignore
//! use wt_config::Credentials;
//! use wt_confluence::{ConfluenceClient, SearchMode, SearchQuery};
//!
//! let credentials = Credentials::Basic {
//!     username: "bot@example.com".into(),
//!     secret: "api-key".into(),
//! };
//! let client = ConfluenceClient::new("https://wiki.example.com", &credentials, true);
//!
//! let ids = client.search(&SearchQuery::new("budget report", SearchMode::Title))?;
//! for id in ids {
//!     let page = client.fetch_page(&id, Default::default())?;
//!     println!("{}: {}", page.title, page.link);
//! }
//! ```

// Auth header encoding
mod auth;
pub use auth::auth_header;

// CQL building
pub mod cql;
pub use cql::{DEFAULT_RESULT_LIMIT, SearchMode, SearchQuery, build_cql};

// API client
mod client;
pub use client::ConfluenceClient;

// Page normalization
mod page;
pub use page::normalize_page;

// Types
mod types;
pub use types::{PageRecord, RawPage, SearchResults};

// Errors
pub mod error;
pub use error::ConfluenceError;
