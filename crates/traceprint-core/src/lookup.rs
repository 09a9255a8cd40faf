//! Three-tier value lookup against a [`ReferenceTable`].
//!
//! Tier 1: exact match on the trimmed value. Tier 2: bidirectional substring
//! scan over the table's declared entry order, so a long user-agent string
//! can match a short "Chrome" key and vice versa. Tier 3: the table's
//! default percent, flagged as an estimate.
//!
//! Known fragility, preserved deliberately: the substring tier has no word
//! boundaries, so a short key can match an unrelated long value. Entry order
//! in the tables is the only defense; do not "fix" this here without
//! revisiting every table.

use crate::reference::ReferenceTable;

/// Outcome of a single table lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupResult {
    /// Market share of the matched entry, or the table default.
    pub percent: f64,
    /// True when no entry matched and the default percent was used.
    pub estimated: bool,
    /// The entry key that matched, if any.
    pub matched_key: Option<&'static str>,
}

/// Resolve a raw observed value against a table. Pure; first match wins.
pub fn resolve(table: &ReferenceTable, value: &str) -> LookupResult {
    let needle = value.trim();

    for (key, percent) in table.entries {
        if needle == *key {
            return LookupResult {
                percent: *percent,
                estimated: false,
                matched_key: Some(key),
            };
        }
    }

    for (key, percent) in table.entries {
        if needle.contains(key) || key.contains(needle) {
            return LookupResult {
                percent: *percent,
                estimated: false,
                matched_key: Some(key),
            };
        }
    }

    LookupResult {
        percent: table.default_percent,
        estimated: true,
        matched_key: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static TABLE: ReferenceTable = ReferenceTable {
        source_citation: "test data",
        entries: &[("Edg/", 5.0), ("Chrome", 65.0), ("Safari", 18.0)],
        default_percent: 0.5,
    };

    #[test]
    fn test_exact_match_not_estimated() {
        let r = resolve(&TABLE, "Chrome");
        assert_eq!(r.percent, 65.0);
        assert!(!r.estimated);
        assert_eq!(r.matched_key, Some("Chrome"));
    }

    #[test]
    fn test_exact_match_trims_whitespace() {
        let r = resolve(&TABLE, "  Safari \n");
        assert_eq!(r.percent, 18.0);
        assert!(!r.estimated);
    }

    #[test]
    fn test_partial_match_long_value_contains_key() {
        let ua = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                  (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";
        let r = resolve(&TABLE, ua);
        // "Edg/" is listed first but does not appear; "Chrome" wins before
        // "Safari" because of declared entry order.
        assert_eq!(r.percent, 65.0);
        assert!(!r.estimated);
    }

    #[test]
    fn test_partial_match_declared_order_wins() {
        let edge_ua = "Mozilla/5.0 ... Chrome/126.0.0.0 Safari/537.36 Edg/126.0.2592.87";
        let r = resolve(&TABLE, edge_ua);
        assert_eq!(r.matched_key, Some("Edg/"));
        assert_eq!(r.percent, 5.0);
    }

    #[test]
    fn test_partial_match_key_contains_value() {
        let r = resolve(&TABLE, "Chro");
        assert_eq!(r.matched_key, Some("Chrome"));
        assert!(!r.estimated);
    }

    #[test]
    fn test_miss_returns_default_estimated() {
        let r = resolve(&TABLE, "Netscape Navigator 4.7");
        assert_eq!(r.percent, 0.5);
        assert!(r.estimated);
        assert_eq!(r.matched_key, None);
    }

    #[test]
    fn test_empty_value_is_contained_by_every_key() {
        // "" is a substring of any key; the first declared entry wins. This
        // is the documented unscoped-substring fragility.
        let r = resolve(&TABLE, "");
        assert_eq!(r.matched_key, Some("Edg/"));
    }
}
