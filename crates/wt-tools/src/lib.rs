//! Assistant tool entry points for wikitool.
//!
//! Packages the Confluence search/fetch pipeline as two host-invocable
//! operations with progress and citation reporting:
//!
//! ```ignore
//! use wt_config::ToolConfig;
//! use wt_tools::{EventSink, Event, Tools};
//!
//! struct StdoutSink;
//! impl EventSink for StdoutSink {
//!     fn emit(&self, event: Event) {
//!         println!("{}", serde_json::to_string(&event).unwrap());
//!     }
//! }
//!
//! let tools = Tools::new(ToolConfig::load(None)?);
//! let json = tools.search("budget report", "title", None, &StdoutSink);
//! ```

mod error;
pub use error::ToolError;

mod events;
pub use events::{CitationData, Event, EventSink, MessageData, Reporter, StatusData};

mod provider;
pub use provider::{ConfluenceProvider, PageProvider};

mod tools;
pub use tools::Tools;

// Configuration surface, re-exported for hosts.
pub use wt_config::{ToolConfig, UserOverrides};
