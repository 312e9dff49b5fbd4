//! Inline `[[identifier]]` references

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// Everything up to the first `]]`; identifiers cannot contain `]`.
static WIKILINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").expect("wikilink pattern is valid"));

/// Distinct identifiers enclosed in double brackets, taken verbatim.
pub fn extract_inline_references(text: &str) -> BTreeSet<String> {
    WIKILINK_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Wikilink targets for display: trimmed, de-duplicated, in order of first
/// appearance.
pub fn resolve_wikilinks(text: &str) -> Vec<String> {
    let mut links: Vec<String> = Vec::new();
    for caps in WIKILINK_PATTERN.captures_iter(text) {
        let Some(target) = caps.get(1).map(|m| m.as_str().trim()) else {
            continue;
        };
        if !target.is_empty() && !links.iter().any(|l| l == target) {
            links.push(target.to_string());
        }
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extracts_distinct_links() {
        let text = "See [[alpha]] and [[beta]], then [[alpha]] again.";
        assert_eq!(extract_inline_references(text), set(&["alpha", "beta"]));
    }

    #[test]
    fn test_no_links() {
        assert!(extract_inline_references("plain [text] with [single] brackets").is_empty());
        assert!(extract_inline_references("").is_empty());
    }

    #[test]
    fn test_empty_brackets_are_ignored() {
        assert!(extract_inline_references("[[]]").is_empty());
    }

    #[test]
    fn test_identifier_is_not_trimmed() {
        assert_eq!(extract_inline_references("[[ spaced ]]"), set(&[" spaced "]));
    }

    #[test]
    fn test_stops_at_first_closing_bracket() {
        assert_eq!(extract_inline_references("[[a]b]]"), BTreeSet::new());
        assert_eq!(extract_inline_references("[[[inner]]]"), set(&["[inner"]));
    }

    #[test]
    fn test_links_spanning_lines() {
        let text = "- [[aave-lending]]\n- [[x402-payments]]\n";
        assert_eq!(
            extract_inline_references(text),
            set(&["aave-lending", "x402-payments"])
        );
    }

    #[test]
    fn test_resolve_wikilinks_keeps_order_and_trims() {
        let text = "[[zeta]] then [[ alpha ]] then [[zeta]] then [[  ]]";
        assert_eq!(resolve_wikilinks(text), vec!["zeta", "alpha"]);
    }
}
