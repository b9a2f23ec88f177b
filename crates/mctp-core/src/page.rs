//! The load cycle: address in, displayable document and title out.
//!
//! Callers (a tab, the CLI) hand in what the user typed and get back a
//! [`Page`]. Nothing here touches presentation state; every outcome,
//! including bad addresses and unreachable servers, is a complete page.

use crate::address::{self, AddressError};
use crate::config::ClientConfig;
use crate::convert;
use crate::protocol;
use crate::title::extract_title;

pub const INVALID_ADDRESS_TITLE: &str = "Invalid URL";
pub const INVALID_SCHEME_TITLE: &str = "Invalid Protocol";
pub const WELCOME_TITLE: &str = "Welcome";

const INVALID_ADDRESS_DOCUMENT: &str = "<h2>Invalid URL</h2>";

const INVALID_SCHEME_DOCUMENT: &str = "\
<h2 style='color:darkred;'>Error</h2>
<p>Protocols like <code>http://</code> or <code>https://</code> are not supported.</p>
<p>Please use format like:</p>
<ul>
    <li><code>localhost[:port]/path</code></li>
    <li><code>mctp://localhost[:port]/path</code></li>
</ul>
";

const WELCOME_DOCUMENT: &str = r#"<h1 style="color:#2c3e50;">Welcome to MCTP Browser</h1>

<p style="font-size: 1.1em; color:#34495e; max-width:600px;">
  MCTP Browser is a lightweight, markdown-based browsing tool designed to fetch and display content from <strong>MCTP (Markdown Content Transfer Protocol)</strong> servers.
</p>

<h2 style="color:#2980b9;">Features</h2>
<ul style="font-size: 1em; color:#34495e; max-width:600px;">
  <li>Fetch and render markdown documents from MCTP servers.</li>
  <li>Support for custom addresses with optional port and paths.</li>
  <li>Fast, simple, and focused on markdown content.</li>
</ul>

<h2 style="color:#2980b9;">How to Use</h2>
<ol style="font-size: 1em; color:#34495e; max-width:600px;">
  <li>Enter an address using the format <code>host[:port]/path</code>. <br> You can omit <code>mctp://</code> as it's added automatically.</li>
  <li>The markdown content is fetched from the server and rendered as HTML.</li>
  <li>A <code>&lt;head&gt;</code> block in the markdown supplies the page title.</li>
</ol>
"#;

/// Result of one load cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// HTML ready for display.
    pub document: String,
    /// Title for the tab or window.
    pub title: String,
    /// Cleaned address to show back to the user; `None` when the address was rejected.
    pub address: Option<String>,
}

impl Page {
    fn rejected(document: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            title: title.into(),
            address: None,
        }
    }
}

/// Built-in page shown before anything has been loaded.
pub fn welcome_page() -> Page {
    Page::rejected(WELCOME_DOCUMENT, WELCOME_TITLE)
}

/// Runs normalize, fetch, convert and title extraction for `raw`.
///
/// Blocks on the network exchange; see [`load_async`] for async callers.
pub fn load(raw: &str, config: &ClientConfig) -> Page {
    let defaults = config.address_defaults();
    let target = match address::normalize(raw, &defaults) {
        Ok(t) => t,
        Err(AddressError::InvalidAddress) => {
            tracing::info!(raw = %raw.trim(), "rejected address");
            return Page::rejected(INVALID_ADDRESS_DOCUMENT, INVALID_ADDRESS_TITLE);
        }
        Err(AddressError::UnsupportedScheme { scheme }) => {
            tracing::info!(%scheme, "rejected address scheme");
            return Page::rejected(INVALID_SCHEME_DOCUMENT, INVALID_SCHEME_TITLE);
        }
        Err(e @ AddressError::InvalidPort { .. }) => {
            tracing::warn!(raw = %raw.trim(), "load failed: {}", e);
            let title = address::with_scheme(raw).unwrap_or_else(|_| raw.trim().to_string());
            let document = format!("<h2>Error: {}</h2>", escape_html(&e.to_string()));
            return Page::rejected(document, title);
        }
    };

    tracing::info!(addr = %target, "loading");
    let body = protocol::fetch(&target, &config.fetch_limits());
    let document = convert::convert(&body).to_html();
    let title = extract_title(&document)
        .unwrap_or_else(|| format!("{}{}", target.host, target.path));

    Page {
        document,
        title,
        address: Some(target.display_address(&defaults)),
    }
}

/// [`load`] on tokio's blocking pool, so async front ends stay responsive.
pub async fn load_async(raw: String, config: ClientConfig) -> anyhow::Result<Page> {
    let page = tokio::task::spawn_blocking(move || load(&raw, &config)).await?;
    Ok(page)
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    // Writing into a String cannot fail.
    let _ = pulldown_cmark_escape::escape_html(&mut out, s);
    out
}
