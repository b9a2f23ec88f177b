//! Address normalization.
//!
//! Turns what a user types (`host`, `host:port/path`, `mctp://host/path`)
//! into a [`Target`] the protocol client can connect to. No I/O happens here.

use std::fmt;

use thiserror::Error;

use crate::config::{AddressDefaults, SCHEME};

const SCHEME_SEPARATOR: &str = "://";

/// Where one fetch goes: host, port and absolute request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub host: String,
    pub port: u16,
    /// Always starts with `/`.
    pub path: String,
}

/// Why a raw address could not be turned into a [`Target`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Blank input, or no host before the port/path.
    #[error("invalid address")]
    InvalidAddress,
    /// The address names a scheme other than `mctp`.
    #[error("unsupported scheme `{scheme}`; only mctp:// addresses are accepted")]
    UnsupportedScheme { scheme: String },
    /// Port segment present but empty, non-numeric or out of range.
    #[error("invalid port `{text}`")]
    InvalidPort { text: String },
}

impl Target {
    /// Address as shown back to the user: no scheme, port only when non-default.
    pub fn display_address(&self, defaults: &AddressDefaults) -> String {
        if self.port == defaults.port {
            format!("{}{}", self.host, self.path)
        } else {
            format!("{}:{}{}", self.host, self.port, self.path)
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}:{}{}", SCHEME, self.host, self.port, self.path)
    }
}

/// Returns `raw` trimmed and carrying the `mctp://` prefix.
///
/// Fails for blank input and for any other scheme.
pub fn with_scheme(raw: &str) -> Result<String, AddressError> {
    let url = raw.trim();
    if url.is_empty() {
        return Err(AddressError::InvalidAddress);
    }
    let prefix = format!("{SCHEME}{SCHEME_SEPARATOR}");
    if url.starts_with(&prefix) {
        return Ok(url.to_string());
    }
    if let Some((scheme, _)) = url.split_once(SCHEME_SEPARATOR) {
        return Err(AddressError::UnsupportedScheme {
            scheme: scheme.to_string(),
        });
    }
    Ok(format!("{prefix}{url}"))
}

/// Parses a raw address into a [`Target`], filling in `defaults`.
///
/// # Examples
///
/// - `"localhost/index.md"` → `localhost`, 9196, `/index.md`
/// - `"example.com:8080"` → `example.com`, 8080, `/index.md`
/// - `"host:"` → [`AddressError::InvalidPort`]
pub fn normalize(raw: &str, defaults: &AddressDefaults) -> Result<Target, AddressError> {
    let url = with_scheme(raw)?;
    let rest = &url[SCHEME.len() + SCHEME_SEPARATOR.len()..];

    let (host_port, path) = match rest.find('/') {
        Some(i) => (&rest[..i], &rest[i..]),
        None => (rest, "/"),
    };

    let (host, port) = match host_port.split_once(':') {
        Some((host, port_text)) => (host, parse_port(port_text)?),
        None => (host_port, defaults.port),
    };
    if host.is_empty() {
        return Err(AddressError::InvalidAddress);
    }

    let path = if path == "/" {
        defaults.path.clone()
    } else {
        path.to_string()
    };

    Ok(Target {
        host: host.to_string(),
        port,
        path,
    })
}

fn parse_port(text: &str) -> Result<u16, AddressError> {
    match text.parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(AddressError::InvalidPort {
            text: text.to_string(),
        }),
    }
}
