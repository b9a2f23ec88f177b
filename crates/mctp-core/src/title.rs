//! Title extraction from an assembled document.

use std::sync::OnceLock;

use regex::Regex;

const TITLE_PATTERN: &str = r"(?is)<title>(.*?)</title>";

static TITLE_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn title_re() -> Option<&'static Regex> {
    TITLE_RE.get_or_init(|| Regex::new(TITLE_PATTERN).ok()).as_ref()
}

/// Returns the trimmed text of the first `<title>` element, if any and non-blank.
pub fn extract_title(document: &str) -> Option<String> {
    let caps = title_re()?.captures(document)?;
    let title = caps.get(1)?.as_str().trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_pattern_compiles() {
        assert!(title_re().is_some());
    }

    #[test]
    fn finds_title() {
        assert_eq!(
            extract_title("<head><title>  My Page </title></head>").as_deref(),
            Some("My Page")
        );
    }

    #[test]
    fn case_insensitive_and_multiline() {
        assert_eq!(
            extract_title("<TITLE>\nTwo\nLines\n</Title>").as_deref(),
            Some("Two\nLines")
        );
    }

    #[test]
    fn absent_or_blank() {
        assert_eq!(extract_title(""), None);
        assert_eq!(extract_title("<h1>No title</h1>"), None);
        assert_eq!(extract_title("<title>   </title>"), None);
        assert_eq!(extract_title("<title>unclosed"), None);
    }

    #[test]
    fn first_title_wins() {
        assert_eq!(
            extract_title("<title>a</title><title>b</title>").as_deref(),
            Some("a")
        );
    }
}
