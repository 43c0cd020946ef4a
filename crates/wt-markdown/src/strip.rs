//! Image stripping for normalized page bodies.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use wt_config::ImageStripPolicy;

/// Regex pattern for markdown image references.
static IMAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[[^\]]*\]\(([^)]*)\)").expect("invalid image regex"));

/// Regex pattern for runs of three or more blank lines.
static BLANK_RUN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{4,}").expect("invalid blank-run regex"));

/// Remove image references from a markdown body per policy.
///
/// With [`ImageStripPolicy::Embedded`] only images whose source is a
/// `data:` URI are removed; with [`ImageStripPolicy::All`] every image
/// reference is removed. After removal, runs of three or more consecutive
/// blank lines collapse to exactly one blank line. With
/// [`ImageStripPolicy::None`] the body is returned unchanged.
pub fn strip_images(body: &str, policy: ImageStripPolicy) -> String {
    let stripped = match policy {
        ImageStripPolicy::None => return body.to_owned(),
        ImageStripPolicy::Embedded => {
            IMAGE_PATTERN.replace_all(body, |caps: &Captures<'_>| {
                if caps[1].starts_with("data:") {
                    String::new()
                } else {
                    caps[0].to_owned()
                }
            })
        }
        ImageStripPolicy::All => IMAGE_PATTERN.replace_all(body, ""),
    };

    BLANK_RUN_PATTERN.replace_all(&stripped, "\n\n").into_owned()
}
