//! Page normalization.

use wt_config::ImageStripPolicy;
use wt_markdown::{html_to_markdown, strip_images};

use crate::error::ConfluenceError;
use crate::types::{PageRecord, RawPage};

/// Normalize a raw API page into a [`PageRecord`].
///
/// Converts the HTML body to markdown, applies the image stripping policy
/// and absolutizes the web UI link against `base_url`. Pure: the same input
/// and policy always produce an identical record.
///
/// # Errors
///
/// Returns [`ConfluenceError::UnexpectedShape`] when a required field is
/// absent from the payload, or [`ConfluenceError::Convert`] when the body
/// HTML cannot be parsed.
pub fn normalize_page(
    raw: &RawPage,
    base_url: &str,
    policy: ImageStripPolicy,
) -> Result<PageRecord, ConfluenceError> {
    let id = raw
        .id
        .as_deref()
        .ok_or(ConfluenceError::UnexpectedShape { field: "id" })?;
    let title = raw
        .title
        .as_deref()
        .ok_or(ConfluenceError::UnexpectedShape { field: "title" })?;
    let html = raw
        .body
        .as_ref()
        .and_then(|body| body.view.as_ref())
        .and_then(|view| view.value.as_deref())
        .ok_or(ConfluenceError::UnexpectedShape {
            field: "body.view.value",
        })?;
    let webui = raw
        .links
        .as_ref()
        .and_then(|links| links.webui.as_deref())
        .ok_or(ConfluenceError::UnexpectedShape {
            field: "_links.webui",
        })?;

    let markdown = html_to_markdown(html)?;
    let body = strip_images(&markdown, policy);

    Ok(PageRecord {
        id: id.to_owned(),
        title: title.to_owned(),
        body,
        link: format!("{base_url}{webui}"),
    })
}
