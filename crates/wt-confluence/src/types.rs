//! Confluence API response types.

use serde::{Deserialize, Serialize};

/// Search endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResults {
    /// Matching content entries, in relevance order.
    #[serde(default)]
    pub results: Vec<SearchHit>,
}

/// One search result entry. Only the ID is consumed; pages are fetched
/// individually afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    /// Content ID.
    pub id: String,
}

/// Raw page as returned by the content endpoint.
///
/// All fields are optional at the serde layer; the page normalizer decides
/// which absences are errors.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPage {
    /// Page ID.
    #[serde(default)]
    pub id: Option<String>,
    /// Page title.
    #[serde(default)]
    pub title: Option<String>,
    /// Page body content.
    #[serde(default)]
    pub body: Option<RawBody>,
    /// Hypermedia links.
    #[serde(rename = "_links", default)]
    pub links: Option<RawLinks>,
}

/// Page body container.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBody {
    /// View format representation.
    #[serde(default)]
    pub view: Option<RawView>,
}

/// View format representation (rendered HTML).
#[derive(Debug, Clone, Deserialize)]
pub struct RawView {
    /// HTML content.
    #[serde(default)]
    pub value: Option<String>,
}

/// Hypermedia links.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLinks {
    /// Web UI link, relative to the instance base URL.
    #[serde(default)]
    pub webui: Option<String>,
}

/// A normalized page, ready to hand to the caller.
///
/// Immutable once built; field order matches the serialized output shape
/// (id, title, body, link).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    /// Page ID.
    pub id: String,
    /// Page title.
    pub title: String,
    /// Body converted to markdown text, post image stripping.
    pub body: String,
    /// Absolute web UI link.
    pub link: String,
}
