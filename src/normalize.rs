//! Brochure URL validation and canonicalization.

use tracing::{instrument, warn};
use url::Url;

/// Validate a raw URL cell and return it with an explicit scheme.
///
/// Whitespace is trimmed and `https://` is prepended when the value does not
/// already start with `http://` or `https://`. The repaired string must then
/// parse as an absolute URL.
///
/// # Returns
///
/// The trimmed (and possibly prefixed) string, or `None` when the input is
/// missing, blank, or not a valid URL after repair.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_url(Some("example.com")), Some("https://example.com".into()));
/// assert_eq!(normalize_url(Some("")), None);
/// ```
#[instrument(level = "debug")]
pub fn normalize_url(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }

    let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    match Url::parse(&candidate) {
        Ok(_) => Some(candidate),
        Err(e) => {
            warn!(url = %candidate, error = %e, "Invalid URL format");
            None
        }
    }
}
