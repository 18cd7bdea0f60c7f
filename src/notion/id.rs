//! Notion object ids

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TRAILING_ID: Regex = Regex::new(r"([0-9a-fA-F]{32})$").unwrap();
}

/// Normalize a database or page id.
///
/// Accepts a bare 32-hex id, a dashed UUID, or a Notion URL whose last path
/// segment ends in the id. Anything else is returned trimmed but otherwise
/// untouched.
///
/// # Examples
/// ```ignore
/// normalize_id("https://www.notion.so/team/Blog-0123...cdef?v=...") // -> "0123...cdef"
/// ```
pub fn normalize_id(input: &str) -> String {
    let input = input.trim();
    let without_query = input.split(['?', '#']).next().unwrap_or(input);
    let segment = without_query
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(without_query);
    let compact = segment.replace('-', "");

    match TRAILING_ID.captures(&compact) {
        Some(caps) => caps[1].to_ascii_lowercase(),
        None => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_id() {
        assert_eq!(
            normalize_id("0123456789ABCDEF0123456789abcdef"),
            "0123456789abcdef0123456789abcdef"
        );
    }

    #[test]
    fn test_dashed_uuid() {
        assert_eq!(
            normalize_id("01234567-89ab-cdef-0123-456789abcdef"),
            "0123456789abcdef0123456789abcdef"
        );
    }

    #[test]
    fn test_database_url() {
        assert_eq!(
            normalize_id("https://www.notion.so/team/My-Blog-0123456789abcdef0123456789abcdef?v=fedcba9876543210fedcba9876543210"),
            "0123456789abcdef0123456789abcdef"
        );
    }

    #[test]
    fn test_unrecognized_id_is_kept() {
        assert_eq!(normalize_id("  my-database "), "my-database");
    }
}
