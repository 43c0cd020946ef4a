//! CQL expression building for content search.

/// Default number of search results per query.
pub const DEFAULT_RESULT_LIMIT: u32 = 5;

/// Which page fields a search query matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Match page titles only.
    Title,
    /// Match page text only.
    Content,
    /// Match either titles or text.
    TitleAndContent,
}

impl SearchMode {
    /// Parse a caller-supplied search type string.
    ///
    /// Case-insensitive; anything other than `"title"` or `"content"`
    /// falls back to [`SearchMode::TitleAndContent`].
    pub fn parse(search_type: &str) -> Self {
        match search_type.to_lowercase().as_str() {
            "title" => SearchMode::Title,
            "content" => SearchMode::Content,
            _ => SearchMode::TitleAndContent,
        }
    }

    /// Human-readable name, as shown in status messages.
    pub fn label(self) -> &'static str {
        match self {
            SearchMode::Title => "title",
            SearchMode::Content => "content",
            SearchMode::TitleAndContent => "title_and_content",
        }
    }

    /// One CQL clause for a single term.
    fn clause(self, term: &str) -> String {
        match self {
            SearchMode::Title => format!(r#"title ~ "{term}""#),
            SearchMode::Content => format!(r#"text ~ "{term}""#),
            SearchMode::TitleAndContent => {
                format!(r#"title ~ "{term}" OR text ~ "{term}""#)
            }
        }
    }
}

/// A free-text search request.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    /// Raw query text.
    pub text: String,
    /// Fields to match against.
    pub mode: SearchMode,
    /// Maximum number of results.
    pub limit: u32,
}

impl SearchQuery {
    /// Create a query with the default result limit.
    pub fn new(text: impl Into<String>, mode: SearchMode) -> Self {
        Self {
            text: text.into(),
            mode,
            limit: DEFAULT_RESULT_LIMIT,
        }
    }

    /// Set the result limit.
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

/// Build the CQL expression for a search query.
///
/// The query text is split on whitespace; each term becomes one clause per
/// the mode's template, joined with `OR` so every term is optional, wrapped
/// in parentheses and restricted to page-type content. An empty or
/// whitespace-only query falls back to a single clause built from the raw
/// text, which can yield a trivial expression like `(title ~ "")`.
///
/// Terms are substituted verbatim, without escaping CQL special characters
/// or embedded double quotes. A term containing `"` can therefore alter the
/// expression; callers pass the text through as-is.
pub fn build_cql(query: &SearchQuery) -> String {
    let terms: Vec<&str> = query.text.split_whitespace().collect();
    let joined = if terms.is_empty() {
        query.mode.clause(&query.text)
    } else {
        terms
            .iter()
            .map(|term| query.mode.clause(term))
            .collect::<Vec<_>>()
            .join(" OR ")
    };
    format!(r#"({joined}) AND type="page""#)
}
