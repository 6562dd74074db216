//! Marker-based extraction from raw API responses.
//!
//! The API answers with small XML documents of a fixed, hand-known shape. We
//! never parse them; we only slice the text between two literal markers.

/// Returns the text strictly between the first `open` marker and the first
/// `close` marker in `haystack`.
///
/// Returns an empty string when either marker is empty, when either marker is
/// missing from `haystack`, or when the first `close` starts before the first
/// `open` ends. No unescaping is done and nested tags are not recognised.
///
/// # Example
/// ```
/// use appnotify::utils::text_between;
///
/// let body = "<id type=\"integer\">42</id>";
/// assert_eq!(text_between(body, "<id type=\"integer\">", "</id>"), "42");
/// assert_eq!(text_between(body, "<ERROR>", "</ERROR>"), "");
/// ```
pub fn text_between<'a>(haystack: &'a str, open: &str, close: &str) -> &'a str {
    if open.is_empty() || close.is_empty() {
        return "";
    }

    let (Some(open_at), Some(close_at)) = (haystack.find(open), haystack.find(close)) else {
        return "";
    };

    haystack.get(open_at + open.len()..close_at).unwrap_or("")
}
