//! HTML to markdown conversion.
//!
//! Converts the XHTML fragment Confluence serves as `body.view` into a
//! markdown-like plain-text representation. Block structure (headings,
//! lists, links, emphasis, code) is preserved as markdown syntax; inline
//! HTML that has no markdown counterpart is dropped while its text content
//! is kept.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::entities::{convert_html_entities, decode_entity};

/// Error converting HTML to markdown.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// XML parsing error.
    #[error("HTML parse error: {0}")]
    Parse(#[from] quick_xml::Error),

    /// Encoding error during XML parsing.
    #[error("encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),
}

/// Convert an HTML fragment to markdown text.
///
/// The fragment is wrapped in a synthetic root element and walked with a
/// streaming XML reader; Confluence view HTML is well-formed XHTML, so no
/// tag-soup recovery is attempted beyond tolerating mismatched end tags.
///
/// # Errors
///
/// Returns [`ConvertError::Parse`] if the fragment cannot be parsed as XML.
pub fn html_to_markdown(html: &str) -> Result<String, ConvertError> {
    // Convert HTML entities to Unicode so the XML parser only sees the
    // standard five plus numeric references
    let html = convert_html_entities(html);
    let wrapped = format!("<root>{html}</root>");

    let mut reader = Reader::from_str(&wrapped);
    reader.config_mut().trim_text(false);
    reader.config_mut().check_end_names = false;

    let mut renderer = MarkdownRenderer::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let tag = tag_name(&e);
                renderer.start_tag(&tag, &e);
            }
            Event::Empty(e) => {
                let tag = tag_name(&e);
                renderer.empty_tag(&tag, &e);
            }
            Event::End(e) => {
                let tag = String::from_utf8_lossy(e.local_name().as_ref()).to_ascii_lowercase();
                renderer.end_tag(&tag);
            }
            Event::Text(e) => {
                let text = reader.decoder().decode(&e)?.into_owned();
                renderer.text(&text);
            }
            Event::GeneralRef(e) => {
                let entity = reader.decoder().decode(&e)?.into_owned();
                renderer.text(&decode_entity(&entity));
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                renderer.text(&text);
            }
            Event::Eof => break,
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {
                // Ignore these
            }
        }
    }

    Ok(renderer.finish())
}

/// Lowercased local tag name.
fn tag_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).to_ascii_lowercase()
}

/// Attribute value by local name, with basic entity unescaping.
fn attr_value(e: &BytesStart<'_>, name: &str) -> Option<String> {
    e.attributes().flatten().find_map(|a| {
        if a.key.local_name().as_ref() == name.as_bytes() {
            Some(unescape_basic(&String::from_utf8_lossy(&a.value)))
        } else {
            None
        }
    })
}

/// Unescape the five standard XML entities in an attribute value.
fn unescape_basic(value: &str) -> String {
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Renders a stream of XML events to markdown text.
#[derive(Default)]
struct MarkdownRenderer {
    output: String,
    /// Stack of nested list counters (None = unordered, Some = next ordinal)
    list_stack: Vec<Option<u64>>,
    /// Stack of open anchors (None = anchor without href)
    link_stack: Vec<Option<String>>,
    /// Whether we're inside a <pre> block
    in_pre: bool,
    /// Nesting depth of open <blockquote> elements
    quote_depth: usize,
}

impl MarkdownRenderer {
    fn start_tag(&mut self, tag: &str, e: &BytesStart<'_>) {
        match tag {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                self.ensure_blank_line();
                let level = tag[1..].parse::<usize>().unwrap_or(1);
                self.output.push_str(&"#".repeat(level));
                self.output.push(' ');
            }
            "p" => {
                self.ensure_blank_line();
                self.push_quote_prefix();
            }
            "blockquote" => {
                self.ensure_blank_line();
                self.quote_depth += 1;
            }
            "ul" => {
                self.start_list(None);
            }
            "ol" => {
                self.start_list(Some(1));
            }
            "li" => {
                self.ensure_line();
                let depth = self.list_stack.len().saturating_sub(1);
                self.output.push_str(&"  ".repeat(depth));
                match self.list_stack.last_mut() {
                    Some(Some(counter)) => {
                        let ordinal = *counter;
                        *counter += 1;
                        self.output.push_str(&format!("{ordinal}. "));
                    }
                    _ => self.output.push_str("- "),
                }
            }
            "a" => {
                let href = attr_value(e, "href");
                if href.is_some() {
                    self.output.push('[');
                }
                self.link_stack.push(href);
            }
            "strong" | "b" => self.output.push_str("**"),
            "em" | "i" => self.output.push('*'),
            "code" => {
                if !self.in_pre {
                    self.output.push('`');
                }
            }
            "pre" => {
                self.ensure_blank_line();
                self.output.push_str("```\n");
                self.in_pre = true;
            }
            // Void elements serialized without the self-closing slash
            "br" | "hr" | "img" => self.empty_tag(tag, e),
            _ => {}
        }
    }

    fn empty_tag(&mut self, tag: &str, e: &BytesStart<'_>) {
        match tag {
            "br" => self.output.push('\n'),
            "hr" => {
                self.ensure_blank_line();
                self.output.push_str("---");
                self.ensure_blank_line();
            }
            "img" => {
                let alt = attr_value(e, "alt").unwrap_or_default();
                let src = attr_value(e, "src").unwrap_or_default();
                self.output.push_str(&format!("![{alt}]({src})"));
            }
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: &str) {
        match tag {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "p" => self.ensure_blank_line(),
            "blockquote" => {
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.ensure_blank_line();
            }
            "ul" | "ol" => {
                self.list_stack.pop();
                if self.list_stack.is_empty() {
                    self.ensure_blank_line();
                }
            }
            "li" | "tr" => self.ensure_line(),
            "a" => {
                if let Some(Some(href)) = self.link_stack.pop() {
                    self.output.push_str(&format!("]({href})"));
                }
            }
            "strong" | "b" => self.output.push_str("**"),
            "em" | "i" => self.output.push('*'),
            "code" => {
                if !self.in_pre {
                    self.output.push('`');
                }
            }
            "pre" => {
                self.in_pre = false;
                self.ensure_line();
                self.output.push_str("```");
                self.ensure_blank_line();
            }
            "td" | "th" => {
                if !self.output.ends_with(char::is_whitespace) {
                    self.output.push(' ');
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.in_pre {
            self.output.push_str(text);
            return;
        }

        // Collapse runs of whitespace the way a browser would
        let mut normalized = String::with_capacity(text.len());
        let mut last_was_space = false;
        for c in text.chars() {
            if c.is_whitespace() {
                if !last_was_space {
                    normalized.push(' ');
                }
                last_was_space = true;
            } else {
                normalized.push(c);
                last_was_space = false;
            }
        }

        // Drop inter-tag whitespace at line starts
        if self.at_line_start() {
            let trimmed = normalized.trim_start();
            if trimmed.is_empty() {
                return;
            }
            self.output.push_str(trimmed);
        } else {
            self.output.push_str(&normalized);
        }
    }

    fn finish(self) -> String {
        self.output.trim_matches(['\n', ' ']).to_owned()
    }

    fn start_list(&mut self, counter: Option<u64>) {
        if self.list_stack.is_empty() {
            self.ensure_blank_line();
        } else {
            self.ensure_line();
        }
        self.list_stack.push(counter);
    }

    fn at_line_start(&self) -> bool {
        self.output.is_empty() || self.output.ends_with('\n')
    }

    /// Terminate the current line, if any.
    fn ensure_line(&mut self) {
        while self.output.ends_with(' ') || self.output.ends_with('\t') {
            self.output.pop();
        }
        if !self.output.is_empty() && !self.output.ends_with('\n') {
            self.output.push('\n');
        }
    }

    /// Terminate the current block with exactly one blank line.
    fn ensure_blank_line(&mut self) {
        while self.output.ends_with(' ') || self.output.ends_with('\t') {
            self.output.pop();
        }
        if self.output.is_empty() {
            return;
        }
        while !self.output.ends_with("\n\n") {
            self.output.push('\n');
        }
    }

    fn push_quote_prefix(&mut self) {
        for _ in 0..self.quote_depth {
            self.output.push_str("> ");
        }
    }
}
