//! Display-scale disambiguation.
//!
//! A raw devicePixelRatio-style reading conflates two causes: the physical
//! pixel density of the panel and any user-applied content scaling. `1.1`
//! can mean a 1.0-density display zoomed to 110%, or something stranger.
//! This module recovers the most likely (base density, scale factor) split
//! against a small canonical search space and reports how confident the
//! split is.
//!
//! The recovered base feeds the market-share lookup as its bucket key; a
//! low-confidence result still participates but is understood to be a guess.

use serde::Serialize;

/// Canonical base pixel densities, ascending. The prior in the search below
/// depends on this order: smaller, more common densities are tried first.
pub const CANONICAL_BASE_RATIOS: [f64; 5] = [1.0, 1.25, 1.5, 2.0, 3.0];

/// Canonical content-scale factors, in percent. 100 means "not scaled".
pub const CANONICAL_SCALE_PERCENTS: [u32; 12] =
    [50, 67, 75, 80, 90, 100, 110, 125, 150, 175, 200, 250];

/// Tolerance for matching a raw reading against an expected ratio.
pub const MATCH_EPSILON: f64 = 0.015;

/// How sure the disambiguation is about its split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// The reading is itself a canonical base density.
    High,
    /// Exactly one interpretation as base x canonical-scale fit (or the
    /// smallest-base interpretation among several).
    Medium,
    /// Nothing fit; the split is a fallback guess.
    Low,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// The recovered split for one raw reading. Stateless; recomputed per call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisambiguationResult {
    /// The raw reading, rounded for stable comparison.
    pub display_value: f64,
    /// Inferred physical base density.
    pub canonical_base: f64,
    /// Inferred content scale, percent. 100 when not scaled.
    pub scale_factor_percent: u32,
    pub is_scaled: bool,
    pub confidence: Confidence,
    /// Lookup key for the market-share table ("1", "1.25", "2", ...).
    pub matched_bucket_key: String,
}

fn round_for_comparison(raw: f64) -> f64 {
    (raw * 10_000.0).round() / 10_000.0
}

fn bucket_key(base: f64) -> String {
    // f64 Display already drops the trailing ".0" (2.0 -> "2", 1.25 -> "1.25").
    base.to_string()
}

/// Split a raw display-scale reading into (base density, scale factor).
pub fn disambiguate(raw: f64) -> DisambiguationResult {
    let value = round_for_comparison(raw.max(0.0));

    // Unscaled canonical density: done.
    for base in CANONICAL_BASE_RATIOS {
        if (value - base).abs() < MATCH_EPSILON {
            return DisambiguationResult {
                display_value: value,
                canonical_base: base,
                scale_factor_percent: 100,
                is_scaled: false,
                confidence: Confidence::High,
                matched_bucket_key: bucket_key(base),
            };
        }
    }

    // Every (base, factor) pair whose product lands within tolerance.
    let mut candidates: Vec<(f64, u32, f64)> = Vec::new();
    for base in CANONICAL_BASE_RATIOS {
        for factor in CANONICAL_SCALE_PERCENTS {
            if factor == 100 {
                continue;
            }
            let expected = base * f64::from(factor) / 100.0;
            let residual = (value - expected).abs();
            if residual < MATCH_EPSILON {
                candidates.push((base, factor, residual));
            }
        }
    }

    // Prior: smaller base densities are more common, so prefer the smallest
    // base; break ties on residual.
    candidates.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal))
    });

    if let Some(&(base, factor, _)) = candidates.first() {
        return DisambiguationResult {
            display_value: value,
            canonical_base: base,
            scale_factor_percent: factor,
            is_scaled: true,
            confidence: Confidence::Medium,
            matched_bucket_key: bucket_key(base),
        };
    }

    // Nothing fit. Assume the smallest base and read the rest as scaling.
    let base = CANONICAL_BASE_RATIOS[0];
    DisambiguationResult {
        display_value: value,
        canonical_base: base,
        scale_factor_percent: (value * 100.0).round() as u32,
        is_scaled: true,
        confidence: Confidence::Low,
        matched_bucket_key: bucket_key(base),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_base_is_high_confidence() {
        let r = disambiguate(2.0);
        assert_eq!(r.canonical_base, 2.0);
        assert_eq!(r.scale_factor_percent, 100);
        assert_eq!(r.confidence, Confidence::High);
        assert!(!r.is_scaled);
        assert_eq!(r.matched_bucket_key, "2");
    }

    #[test]
    fn test_near_canonical_within_epsilon() {
        let r = disambiguate(1.501);
        assert_eq!(r.canonical_base, 1.5);
        assert_eq!(r.confidence, Confidence::High);
    }

    #[test]
    fn test_scaled_reading_prefers_smallest_base() {
        let r = disambiguate(1.1);
        assert_eq!(r.canonical_base, 1.0);
        assert_eq!(r.scale_factor_percent, 110);
        assert_eq!(r.confidence, Confidence::Medium);
        assert!(r.is_scaled);
        assert_eq!(r.matched_bucket_key, "1");
    }

    #[test]
    fn test_ambiguous_product_resolved_by_base_prior() {
        // 1.5 x 100% is canonical (high), but 2.25 = 1.5 x 150% = 3.0 x 75%.
        let r = disambiguate(2.25);
        assert_eq!(r.canonical_base, 1.5);
        assert_eq!(r.scale_factor_percent, 150);
        assert_eq!(r.confidence, Confidence::Medium);
    }

    #[test]
    fn test_no_match_falls_back_to_smallest_base() {
        let r = disambiguate(0.37);
        assert_eq!(r.canonical_base, 1.0);
        assert_eq!(r.scale_factor_percent, 37);
        assert_eq!(r.confidence, Confidence::Low);
        assert!(r.is_scaled);
    }

    #[test]
    fn test_rounding_stabilizes_comparison() {
        // Floating noise far below epsilon must not change the outcome.
        let r = disambiguate(2.000000000004);
        assert_eq!(r.confidence, Confidence::High);
        assert_eq!(r.display_value, 2.0);
    }

    #[test]
    fn test_negative_input_clamped() {
        let r = disambiguate(-1.0);
        assert_eq!(r.confidence, Confidence::Low);
        assert_eq!(r.scale_factor_percent, 0);
    }
}
