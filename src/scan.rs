//! Document scanning: locating effect URLs inside JSON trees.
//!
//! Locale page configuration files embed effect URLs at arbitrary depth.
//! The scanner is a typed depth-first visitor over [`serde_json::Value`]:
//! an object whose `url` member is a string containing either canonical
//! category segment yields an occurrence, and every member is then visited
//! in document order (serde_json's `preserve_order` feature makes map
//! iteration follow the source document).
//!
//! Structural locations use dot-separated keys with bracketed array
//! indices, `sections[2].items[0].url`. The scanner only locates candidate
//! strings — interpreting them is the parser's job.
//!
//! [`rewrite_effect_urls`] is the mutable twin: it visits exactly the
//! fields [`find_effect_urls`] reports, in the same order, and applies a
//! caller-supplied replacement.

use serde_json::Value;

/// A URL-bearing field discovered in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlOccurrence {
    /// Structural location of the field, e.g. `sections[2].items[0].url`.
    pub path: String,
    pub url: String,
}

/// True when a string value looks like an effect URL worth checking.
fn is_effect_url(value: &str) -> bool {
    value.contains("/video-effects/") || value.contains("/photo-effects/")
}

/// Find every effect URL in a document, depth-first, in document order.
pub fn find_effect_urls(document: &Value) -> Vec<UrlOccurrence> {
    let mut results = Vec::new();
    walk(document, "", &mut results);
    results
}

fn walk(value: &Value, path: &str, results: &mut Vec<UrlOccurrence>) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(url)) = map.get("url") {
                if is_effect_url(url) {
                    results.push(UrlOccurrence {
                        path: join_key(path, "url"),
                        url: url.clone(),
                    });
                }
            }
            for (key, child) in map {
                walk(child, &join_key(path, key), results);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                walk(child, &format!("{path}[{index}]"), results);
            }
        }
        // Scalar leaves carry no structure to descend into.
        _ => {}
    }
}

/// Apply `replace` to every effect URL in the document, visiting the same
/// fields as [`find_effect_urls`] in the same order. `replace` receives
/// the structural path and current value; returning `Some` substitutes the
/// value in place. Returns the number of substitutions made.
pub fn rewrite_effect_urls<F>(document: &mut Value, replace: &mut F) -> usize
where
    F: FnMut(&str, &str) -> Option<String>,
{
    rewrite_walk(document, "", replace)
}

fn rewrite_walk<F>(value: &mut Value, path: &str, replace: &mut F) -> usize
where
    F: FnMut(&str, &str) -> Option<String>,
{
    let mut changed = 0;
    match value {
        Value::Object(map) => {
            if let Some(Value::String(url)) = map.get_mut("url") {
                if is_effect_url(url) {
                    if let Some(replacement) = replace(&join_key(path, "url"), url) {
                        *url = replacement;
                        changed += 1;
                    }
                }
            }
            for (key, child) in map.iter_mut() {
                let child_path = join_key(path, key);
                changed += rewrite_walk(child, &child_path, replace);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter_mut().enumerate() {
                changed += rewrite_walk(child, &format!("{path}[{index}]"), replace);
            }
        }
        _ => {}
    }
    changed
}

fn join_key(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn finds_urls_at_nested_paths() {
        let document = json!({
            "hero": { "url": "/video-effects/ai-kissing" },
            "sections": [
                { "title": "one" },
                { "items": [ { "url": "/photo-effects/art-style?type=x" } ] }
            ]
        });

        let found = find_effect_urls(&document);
        let paths: Vec<&str> = found.iter().map(|o| o.path.as_str()).collect();
        assert_eq!(paths, ["hero.url", "sections[1].items[0].url"]);
        assert_eq!(found[0].url, "/video-effects/ai-kissing");
    }

    #[test]
    fn root_level_url_has_bare_path() {
        let document = json!({ "url": "/video-effects/ai-hug", "title": "x" });
        let found = find_effect_urls(&document);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path, "url");
    }

    #[test]
    fn ignores_urls_without_category_segment() {
        let document = json!({
            "a": { "url": "https://example.com/image.png" },
            "b": { "url": "/tools/ai-kissing" },
            "c": { "link": "/video-effects/ai-kissing" }
        });
        assert!(find_effect_urls(&document).is_empty());
    }

    #[test]
    fn malformed_effect_urls_are_still_located() {
        // Locating is the scanner's job; judging is the parser's.
        let document = json!({ "x": { "url": "/video-effects/艺术/extra" } });
        assert_eq!(find_effect_urls(&document).len(), 1);
    }

    #[test]
    fn traversal_is_document_order() {
        let document = json!({
            "zebra": { "url": "/video-effects/first" },
            "alpha": { "url": "/video-effects/second" }
        });
        let occurrences = find_effect_urls(&document);
        let urls: Vec<&str> = occurrences
            .iter()
            .map(|o| o.url.as_str())
            .collect();
        // Document order, not sorted key order.
        assert_eq!(urls, ["/video-effects/first", "/video-effects/second"]);
    }

    #[test]
    fn scalars_and_non_object_roots_yield_nothing() {
        assert!(find_effect_urls(&json!("/video-effects/ai-kissing")).is_empty());
        assert!(find_effect_urls(&json!(42)).is_empty());
        assert!(find_effect_urls(&json!(null)).is_empty());
    }

    #[test]
    fn rewrite_substitutes_in_place_and_counts() {
        let mut document = json!({
            "hero": { "url": "/video-effects/ai-kissingg" },
            "keep": { "url": "/photo-effects/art-style" }
        });

        let mut seen = Vec::new();
        let changed = rewrite_effect_urls(&mut document, &mut |path, url| {
            seen.push(path.to_string());
            url.ends_with("ai-kissingg")
                .then(|| "/video-effects/ai-kissing".to_string())
        });

        assert_eq!(changed, 1);
        assert_eq!(seen, ["hero.url", "keep.url"]);
        assert_eq!(document["hero"]["url"], json!("/video-effects/ai-kissing"));
        assert_eq!(document["keep"]["url"], json!("/photo-effects/art-style"));
    }

    #[test]
    fn rewrite_visits_what_find_reports() {
        let mut document = json!({
            "a": [ { "url": "/video-effects/x" }, { "url": "/photo-effects/y" } ]
        });
        let found: Vec<String> = find_effect_urls(&document)
            .into_iter()
            .map(|o| o.path)
            .collect();

        let mut visited = Vec::new();
        rewrite_effect_urls(&mut document, &mut |path, _| {
            visited.push(path.to_string());
            None
        });
        assert_eq!(found, visited);
    }
}
