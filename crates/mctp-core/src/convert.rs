//! Markdown to document conversion.
//!
//! A fetched body may carry one `<head>…</head>` block of document metadata
//! (title, styles). That block is lifted out verbatim, the rest is rendered
//! as CommonMark, and both are placed into a fixed HTML skeleton.

use std::fmt;
use std::sync::OnceLock;

use pulldown_cmark::{html, Options, Parser};
use regex::Regex;

const HEAD_PATTERN: &str = r"(?is)<head>(.*?)</head>";

static HEAD_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn head_re() -> Option<&'static Regex> {
    HEAD_RE.get_or_init(|| Regex::new(HEAD_PATTERN).ok()).as_ref()
}

/// Metadata and rendered body of one fetched page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Inner text of the metadata block, trimmed. Empty when there was none.
    pub metadata: String,
    /// HTML rendered from everything outside the metadata block.
    pub body_markup: String,
}

impl Document {
    /// The full HTML document: declaration, head, body, in that order.
    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n{}\n</head>\n<body>\n{}\n</body>\n</html>\n",
            self.metadata, self.body_markup
        )
    }
}

/// Splits `raw` into `(metadata, markdown)`.
///
/// Only the first metadata block is lifted; markers match case-insensitively
/// and the block may span lines. Both parts come back trimmed.
pub fn split_metadata(raw: &str) -> (String, String) {
    let Some(re) = head_re() else {
        return (String::new(), raw.trim().to_string());
    };
    match re.captures(raw) {
        Some(caps) => {
            let metadata = caps.get(1).map_or("", |m| m.as_str()).trim().to_string();
            let body = re.replace(raw, "");
            (metadata, body.trim().to_string())
        }
        None => (String::new(), raw.trim().to_string()),
    }
}

/// Renders CommonMark to HTML.
pub fn render_markdown(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::empty());
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Converts a fetched body into a [`Document`]. Total over all inputs.
pub fn convert(raw: &str) -> Document {
    let (metadata, markdown) = split_metadata(raw);
    let body_markup = render_markdown(&markdown);
    tracing::debug!(
        metadata_bytes = metadata.len(),
        body_bytes = body_markup.len(),
        "converted document"
    );
    Document {
        metadata,
        body_markup,
    }
}
