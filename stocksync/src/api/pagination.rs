//! Cursor pagination via the `Link` response header.
//!
//! The product listing endpoint communicates the next page as an absolute
//! URL in a `Link` header entry with `rel="next"`; the last page omits that
//! relation.

use once_cell::sync::Lazy;
use regex::Regex;

static NEXT_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<([^>]+)>;\s*rel="next""#).expect("next-link pattern"));

/// Extract the `rel="next"` URL from a `Link` header value, if present.
pub fn next_page_url(link_header: &str) -> Option<String> {
    NEXT_LINK
        .captures(link_header)
        .map(|caps| caps[1].to_string())
}
