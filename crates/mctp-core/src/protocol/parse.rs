//! Parse response header lines.

/// One response header line. Captured for logging, never interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

/// Split a header line at the first `:`. Lines without a colon keep an empty value.
pub(crate) fn parse_header_line(line: &str) -> Header {
    match line.split_once(':') {
        Some((name, value)) => Header {
            name: name.trim().to_string(),
            value: value.trim().to_string(),
        },
        None => Header {
            name: line.trim().to_string(),
            value: String::new(),
        },
    }
}

/// Strip the `\n` (and a preceding `\r`) that ends a raw line.
pub(crate) fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
