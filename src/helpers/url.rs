//! URL helper functions

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped in a path segment (RFC 3986 unreserved are kept)
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Directory under which post detail pages are routed
pub const POST_DIR: &str = "blog";

/// Site-relative path of a post
///
/// # Examples
/// ```ignore
/// post_path("hello-world") // -> "/blog/hello-world"
/// ```
pub fn post_path(slug: &str) -> String {
    format!("/{}/{}", POST_DIR, encode_segment(slug))
}

/// Join a base URL and a site-relative path
///
/// # Examples
/// ```ignore
/// full_url_for("https://example.com/", "/blog/a") // -> "https://example.com/blog/a"
/// ```
pub fn full_url_for(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", base)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Percent-encode one path segment
pub fn encode_segment(segment: &str) -> String {
    percent_encoding::utf8_percent_encode(segment, SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_path() {
        assert_eq!(post_path("hello-world"), "/blog/hello-world");
        assert_eq!(post_path("a/b"), "/blog/a%2Fb");
        assert_eq!(post_path("노션"), "/blog/%EB%85%B8%EC%85%98");
    }

    #[test]
    fn test_full_url_for() {
        assert_eq!(
            full_url_for("http://localhost:3000", "/blog/x"),
            "http://localhost:3000/blog/x"
        );
        assert_eq!(full_url_for("https://example.com/", ""), "https://example.com/");
    }
}
