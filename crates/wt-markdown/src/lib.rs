//! HTML to markdown conversion for wikitool.
//!
//! Turns the HTML fragment of a Confluence page body into readable markdown
//! text and applies the configured image stripping policy.

mod entities;
mod html;
mod strip;

pub use html::{ConvertError, html_to_markdown};
pub use strip::strip_images;

// Policy lives with the config surface; re-exported here for convenience.
pub use wt_config::ImageStripPolicy;
