//! Effect-URL grammar: parsing, slug recovery, construction.
//!
//! The grammar is deliberately strict:
//!
//! ```text
//! <"/video-effects" | "/photo-effects"> "/" <slug> ["?" <query>]
//! ```
//!
//! Exactly two non-empty path segments; the slug must be 7-bit ASCII.
//! Parsing never fails — every problem is accumulated into
//! [`ParsedUrl::errors`] and checking continues, so a single pass reports
//! everything wrong with a URL rather than only the first issue. The slug
//! is recorded even when the prefix is unrecognized, which is what lets the
//! matcher still propose a fix for half-broken URLs.

use crate::registry::Category;
use std::collections::BTreeMap;
use url::form_urlencoded;

/// A parsed effect URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedUrl {
    /// The input string, unmodified.
    pub original: String,
    /// Recognized category prefix, when the first segment is canonical.
    pub prefix: Option<Category>,
    /// Second path segment, recorded even when the prefix was invalid.
    pub slug: Option<String>,
    /// Percent-decoded query parameters.
    pub query: BTreeMap<String, String>,
    /// Problems found, in discovery order.
    pub errors: Vec<String>,
}

impl ParsedUrl {
    /// True exactly when no error was recorded.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The decoded `type` query value, when present.
    pub fn query_type(&self) -> Option<&str> {
        self.query.get("type").map(String::as_str)
    }
}

/// Parse an effect URL, accumulating every grammar violation.
pub fn parse_effect_url(url: &str) -> ParsedUrl {
    let mut parsed = ParsedUrl {
        original: url.to_string(),
        prefix: None,
        slug: None,
        query: BTreeMap::new(),
        errors: Vec::new(),
    };

    let (path_part, query_part) = match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url, None),
    };

    if let Some(query) = query_part {
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            parsed.query.insert(key.into_owned(), value.into_owned());
        }
    }

    let segments: Vec<&str> = path_part.split('/').filter(|s| !s.is_empty()).collect();

    // Too short to carry a prefix and a slug: nothing further to check.
    if segments.len() < 2 {
        parsed
            .errors
            .push("URL must have at least 2 path segments".to_string());
        return parsed;
    }

    let prefix = format!("/{}", segments[0]);
    match Category::from_path_prefix(&prefix) {
        Some(category) => parsed.prefix = Some(category),
        None => parsed.errors.push(format!(
            "Invalid path prefix: {prefix}. Must be /video-effects or /photo-effects"
        )),
    }

    let slug = segments[1];
    parsed.slug = Some(slug.to_string());
    if !slug.is_ascii() {
        parsed
            .errors
            .push("Slug contains non-ASCII characters".to_string());
    }

    if segments.len() > 2 {
        parsed.errors.push(format!(
            "URL has extra path segments: {}",
            segments[2..].join("/")
        ));
    }

    parsed
}

/// Best-effort slug recovery from a URL that fails the strict grammar.
///
/// Strips the query string and either canonical prefix, replaces each run
/// of non-ASCII characters with a single hyphen, collapses repeated
/// hyphens, trims edge hyphens, and lowercases. Returns `None` when
/// nothing usable remains.
pub fn extract_slug_from_malformed_url(url: &str) -> Option<String> {
    let path_part = url.split('?').next().unwrap_or(url);
    let without_prefix = path_part
        .strip_prefix("/video-effects/")
        .or_else(|| path_part.strip_prefix("/photo-effects/"))
        .unwrap_or(path_part);

    let mut cleaned = String::with_capacity(without_prefix.len());
    for c in without_prefix.chars() {
        let c = if c.is_ascii() { c } else { '-' };
        if c == '-' && cleaned.ends_with('-') {
            continue;
        }
        cleaned.push(c);
    }
    let cleaned = cleaned.trim_matches('-').to_ascii_lowercase();

    if cleaned.is_empty() { None } else { Some(cleaned) }
}

/// Build a canonical effect URL from validated parts.
///
/// The `type` query value is percent-encoded when supplied; other query
/// parameters are never carried.
pub fn construct_effect_url(prefix: Category, slug: &str, query_type: Option<&str>) -> String {
    let mut url = format!("{}/{}", prefix.path_prefix(), slug);
    if let Some(value) = query_type {
        url.push('?');
        let encoded = form_urlencoded::Serializer::new(String::new())
            .append_pair("type", value)
            .finish();
        url.push_str(&encoded);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_video_url() {
        let parsed = parse_effect_url("/video-effects/ai-kissing");
        assert!(parsed.is_valid());
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.prefix, Some(Category::Video));
        assert_eq!(parsed.slug.as_deref(), Some("ai-kissing"));
        assert!(parsed.query.is_empty());
    }

    #[test]
    fn query_type_is_decoded() {
        let parsed = parse_effect_url("/photo-effects/art-style?type=%E8%89%BA%E6%9C%AF&x=1");
        assert!(parsed.is_valid());
        assert_eq!(parsed.query_type(), Some("艺术"));
        assert_eq!(parsed.query.get("x").map(String::as_str), Some("1"));
    }

    #[test]
    fn too_few_segments_stops_parsing() {
        let parsed = parse_effect_url("/video-effects");
        assert!(!parsed.is_valid());
        assert_eq!(parsed.errors, ["URL must have at least 2 path segments"]);
        assert_eq!(parsed.slug, None);
        assert_eq!(parsed.prefix, None);
    }

    #[test]
    fn bad_prefix_still_records_slug() {
        let parsed = parse_effect_url("/bad-prefix/foo");
        assert!(!parsed.is_valid());
        assert_eq!(parsed.slug.as_deref(), Some("foo"));
        assert_eq!(parsed.prefix, None);
        assert!(parsed.errors[0].contains("Invalid path prefix: /bad-prefix"));
    }

    #[test]
    fn non_ascii_slug_is_rejected() {
        let parsed = parse_effect_url("/photo-effects/艺术");
        assert!(!parsed.is_valid());
        assert_eq!(parsed.errors, ["Slug contains non-ASCII characters"]);
        assert_eq!(parsed.prefix, Some(Category::Photo));
    }

    #[test]
    fn extra_segments_name_the_suffix() {
        let parsed = parse_effect_url("/video-effects/ai-kissing/extra?type=x");
        assert!(!parsed.is_valid());
        assert_eq!(parsed.errors, ["URL has extra path segments: extra"]);
        assert_eq!(parsed.slug.as_deref(), Some("ai-kissing"));
    }

    #[test]
    fn multiple_problems_all_accumulate() {
        let parsed = parse_effect_url("/bad/艺术/more/still-more");
        assert_eq!(parsed.errors.len(), 3);
        assert!(parsed.errors[0].contains("Invalid path prefix"));
        assert!(parsed.errors[1].contains("non-ASCII"));
        assert!(parsed.errors[2].contains("more/still-more"));
    }

    #[test]
    fn empty_segments_are_discarded() {
        let parsed = parse_effect_url("//video-effects//ai-hug/");
        assert!(parsed.is_valid());
        assert_eq!(parsed.slug.as_deref(), Some("ai-hug"));
    }

    #[test]
    fn construct_then_parse_round_trips() {
        for (prefix, slug) in [
            (Category::Video, "ai-kissing"),
            (Category::Photo, "art-style"),
        ] {
            let url = construct_effect_url(prefix, slug, None);
            let parsed = parse_effect_url(&url);
            assert!(parsed.is_valid());
            assert_eq!(parsed.prefix, Some(prefix));
            assert_eq!(parsed.slug.as_deref(), Some(slug));
        }
    }

    #[test]
    fn construct_encodes_the_type_value() {
        let url = construct_effect_url(Category::Video, "ai-kissing", Some("法式"));
        assert_eq!(url, "/video-effects/ai-kissing?type=%E6%B3%95%E5%BC%8F");
        let parsed = parse_effect_url(&url);
        assert_eq!(parsed.query_type(), Some("法式"));
    }

    #[test]
    fn extract_slug_strips_prefix_and_query() {
        assert_eq!(
            extract_slug_from_malformed_url("/video-effects/AI-Kissing?type=x"),
            Some("ai-kissing".to_string())
        );
    }

    #[test]
    fn extract_slug_hyphenates_non_ascii_runs() {
        assert_eq!(
            extract_slug_from_malformed_url("/photo-effects/art艺术style"),
            Some("art-style".to_string())
        );
        // A run of non-ASCII collapses to one hyphen, edges are trimmed.
        assert_eq!(
            extract_slug_from_malformed_url("/video-effects/舞蹈ai-dance舞蹈"),
            Some("ai-dance".to_string())
        );
    }

    #[test]
    fn extract_slug_returns_none_when_nothing_remains() {
        assert_eq!(extract_slug_from_malformed_url("/video-effects/舞蹈"), None);
        assert_eq!(extract_slug_from_malformed_url(""), None);
    }

    #[test]
    fn extract_slug_collapses_existing_double_hyphens() {
        assert_eq!(
            extract_slug_from_malformed_url("ai--kissing--"),
            Some("ai-kissing".to_string())
        );
    }
}
