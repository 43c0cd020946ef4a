//! Progress and citation events.
//!
//! The core never talks to a concrete sink; it holds a reference to an
//! [`EventSink`] supplied by the host (console, network stream, UI bridge)
//! and hands it fully-formed [`Event`]s. Events serialize to the host
//! runtime's wire shape.

use serde::Serialize;

/// One event emitted towards the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Event {
    /// Progress update for the status line.
    Status(StatusData),
    /// Raw content passthrough.
    Message(MessageData),
    /// Citation registering retrieved content with its source.
    Citation(CitationData),
}

/// Status event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusData {
    /// Glyph-prefixed description.
    pub description: String,
    /// `"in_progress"` or `"complete"`.
    pub status: String,
    /// Whether the step has finished.
    pub done: bool,
}

/// Message event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageData {
    /// Raw content.
    pub content: String,
}

/// Citation event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CitationData {
    /// Retrieved content, one entry per document.
    pub document: Vec<String>,
    /// Per-document metadata, parallel to `document`.
    pub metadata: Vec<CitationMetadata>,
    /// Source descriptor.
    pub source: CitationSource,
}

/// Metadata for one cited document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CitationMetadata {
    /// Source URL.
    pub source: String,
    /// Whether the content is HTML rather than plain text.
    pub html: bool,
}

/// Citation source descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CitationSource {
    /// Display name, typically the page title.
    pub name: String,
}

/// Host-supplied event listener.
///
/// Emissions are fire-and-forget: the core does not inspect any result, but
/// each call returns before the next pipeline step starts, so a status
/// update is visible before the network call it announces.
pub trait EventSink {
    /// Receive one event.
    fn emit(&self, event: Event);
}

/// Formats pipeline progress into [`Event`]s for a sink.
pub struct Reporter<'a> {
    sink: &'a dyn EventSink,
}

impl<'a> Reporter<'a> {
    /// Wrap a sink.
    pub fn new(sink: &'a dyn EventSink) -> Self {
        Self { sink }
    }

    /// Emit a status update with a state glyph: in-progress, success, or
    /// failure.
    pub fn status(&self, description: &str, done: bool, error: bool) {
        let glyph = if done {
            if error { "\u{274c}" } else { "\u{2705}" }
        } else {
            "\u{1f50e}"
        };
        let status = if done { "complete" } else { "in_progress" };
        self.sink.emit(Event::Status(StatusData {
            description: format!("{glyph} {description}"),
            status: status.to_owned(),
            done,
        }));
    }

    /// Emit a raw content message. Part of the sink contract, unused by the
    /// built-in flows.
    pub fn message(&self, content: &str) {
        self.sink.emit(Event::Message(MessageData {
            content: content.to_owned(),
        }));
    }

    /// Register one citation for a retrieved page.
    pub fn source(&self, name: &str, url: &str, content: &str, html: bool) {
        self.sink.emit(Event::Citation(CitationData {
            document: vec![content.to_owned()],
            metadata: vec![CitationMetadata {
                source: url.to_owned(),
                html,
            }],
            source: CitationSource {
                name: name.to_owned(),
            },
        }));
    }
}
