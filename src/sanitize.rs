//! URL Sanitizer
//!
//! Guards links coming from third-party payloads before they are handed to
//! a browser.

use url::Url;

/// Returns `raw` untouched when it parses as an absolute `http`/`https` URL.
///
/// Relative paths, unparsable text and every other scheme (`javascript:`,
/// `data:`, `mailto:`, ...) yield `None`.
pub fn sanitize_url(raw: &str) -> Option<&str> {
    match Url::parse(raw) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Some(raw),
        _ => None,
    }
}
