//! Tag parsing and canonicalization.
//!
//! Tags are plain strings. Input is split on whitespace; stored tag lists are
//! trimmed, lowercased, deduplicated and kept in sorted order, so `One` and
//! `one` are the same tag.

use std::collections::BTreeSet;

/// Split a whitespace-separated tag string into individual tags.
pub fn parse_tags(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// The stored form of a single tag, or `None` for a blank one.
pub fn fold_tag(tag: &str) -> Option<String> {
    let tag = tag.trim();
    (!tag.is_empty()).then(|| tag.to_lowercase())
}

/// Fold, deduplicate and sort a list of tags. Blank tags are dropped.
pub fn canonify_tags<S: AsRef<str>>(tags: impl IntoIterator<Item = S>) -> Vec<String> {
    tags.into_iter()
        .filter_map(|t| fold_tag(t.as_ref()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Join tags back into the space-separated form.
pub fn join_tags<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ")
}

/// Merge `additions` into `existing`. Returns whether anything changed.
pub fn merge_tags(existing: &mut Vec<String>, additions: &[String]) -> bool {
    let merged = canonify_tags(existing.iter().chain(additions));
    let changed = merged != *existing;
    *existing = merged;
    changed
}

/// Remove `removals` from `existing`. Returns whether anything changed.
pub fn remove_tags(existing: &mut Vec<String>, removals: &[String]) -> bool {
    let removals: Vec<String> = removals.iter().filter_map(|t| fold_tag(t)).collect();
    let before = existing.len();
    existing.retain(|t| !removals.contains(t));
    existing.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags("  foo\taaa \n bar "), vec!["foo", "aaa", "bar"]);
        assert!(parse_tags("   ").is_empty());
    }

    #[test]
    fn test_canonify_sorts_and_dedupes() {
        assert_eq!(
            canonify_tags(["foo", " aaa", "foo", "", "Foo"]),
            vec!["aaa", "foo"]
        );
    }

    #[test]
    fn test_join_tags() {
        assert_eq!(join_tags(&["aaa", "foo"]), "aaa foo");
        assert_eq!(join_tags::<&str>(&[]), "");
    }

    #[test]
    fn test_merge_is_idempotent_per_tag() {
        let mut tags = vec!["foo".to_string()];
        assert!(merge_tags(&mut tags, &parse_tags("foo aaa")));
        assert_eq!(tags, vec!["aaa", "foo"]);

        assert!(!merge_tags(&mut tags, &parse_tags("aaa")));
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn test_remove_tags() {
        let mut tags = canonify_tags(["one", "two", "three"]);
        assert!(remove_tags(&mut tags, &parse_tags("two four")));
        assert_eq!(tags, vec!["one", "three"]);
        assert!(!remove_tags(&mut tags, &parse_tags("four")));
    }

    #[test]
    fn test_tags_fold_case() {
        assert_eq!(fold_tag(" ONE "), Some("one".to_string()));
        assert_eq!(fold_tag("  "), None);

        let mut tags = canonify_tags(["One", "three"]);
        assert_eq!(tags, vec!["one", "three"]);
        assert!(!merge_tags(&mut tags, &parse_tags("one ONE")));
        assert_eq!(tags, vec!["one", "three"]);

        assert!(remove_tags(&mut tags, &parse_tags("THREE")));
        assert_eq!(tags, vec!["one"]);
    }
}
