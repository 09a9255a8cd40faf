//! Static reference data: market-share tables and baseline entropy records.
//!
//! Tables map observed attribute values to the percentage of a reference
//! population reporting that value. Baseline records carry a fixed,
//! study-derived entropy estimate for attributes that have no reliable direct
//! lookup, and act as the fallback when a table lookup misses.
//!
//! Baseline selection policy: every record's `bits` is the **minimum** across
//! the considered source studies, so uniqueness is never overstated. One
//! record (canvas) deliberately rejects a numerically lower candidate because
//! that study's population was demographically skewed; the rejection is
//! encoded on the candidate itself, not hidden in the selected value.

/// One attribute's market-share table.
///
/// `entries` is a declared ordered list, not a hash map: the partial-match
/// tier of the lookup scans it in this exact order, and for overlapping
/// tokens (Edge user agents also contain "Chrome"; every WebKit user agent
/// contains "Safari") the first listed key must win.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceTable {
    /// Where the percentages come from.
    pub source_citation: &'static str,
    /// Ordered (value, percent) pairs. Percents are in (0, 100].
    pub entries: &'static [(&'static str, f64)],
    /// Percent assigned to values matching no entry. Always present.
    pub default_percent: f64,
}

/// A single study's entropy estimate considered for a baseline record.
#[derive(Debug, Clone, Copy)]
pub struct StudyEstimate {
    pub study: &'static str,
    pub bits: f64,
    /// `Some(reason)` marks a candidate rejected by policy even when it is
    /// the numerical minimum.
    pub exclusion: Option<&'static str>,
}

/// Fixed entropy estimate for one attribute, pre-selected from `considered`.
#[derive(Debug, Clone, Copy)]
pub struct BaselineRecord {
    pub attribute_key: &'static str,
    /// Minimum bits across non-excluded candidates in `considered`.
    pub bits: f64,
    /// The study the selected value comes from.
    pub source_citation: &'static str,
    pub note: &'static str,
    /// All candidates that were weighed, including excluded ones.
    pub considered: &'static [StudyEstimate],
}

// ---------------------------------------------------------------------------
// Market-share tables
// ---------------------------------------------------------------------------

/// Browser family share. Order matters for the partial-match tier: Edge,
/// Opera, and Samsung user agents all contain "Chrome", and every
/// WebKit-derived user agent contains "Safari", so the more specific tokens
/// are listed first.
pub static USER_AGENT_TABLE: ReferenceTable = ReferenceTable {
    source_citation: "StatCounter Global Stats, browser share, July 2025",
    entries: &[
        ("Edg/", 4.9),
        ("OPR/", 2.1),
        ("SamsungBrowser", 2.2),
        ("Firefox", 2.7),
        ("Chrome", 65.3),
        ("Safari", 17.6),
    ],
    default_percent: 0.2,
};

pub static OPERATING_SYSTEM_TABLE: ReferenceTable = ReferenceTable {
    source_citation: "StatCounter Global Stats, desktop OS share, July 2025",
    entries: &[
        ("Windows", 70.1),
        ("macOS", 16.0),
        ("Linux", 4.4),
        ("ChromeOS", 1.8),
    ],
    default_percent: 1.0,
};

pub static LANGUAGE_TABLE: ReferenceTable = ReferenceTable {
    source_citation: "W3Techs content-language survey, 2025",
    entries: &[
        ("en-US", 31.0),
        ("zh-CN", 12.4),
        ("es", 8.9),
        ("en-GB", 4.2),
        ("de", 4.1),
        ("ru", 3.8),
        ("pt-BR", 3.5),
        ("fr", 3.4),
        ("ja", 2.9),
    ],
    default_percent: 0.4,
};

/// Keyed by UTC offset label. Weights follow population density per offset.
pub static TIMEZONE_TABLE: ReferenceTable = ReferenceTable {
    source_citation: "UN population distribution by UTC offset, 2024 estimate",
    entries: &[
        ("UTC+8", 17.0),
        ("UTC+5:30", 6.1),
        ("UTC+1", 14.0),
        ("UTC+0", 11.8),
        ("UTC+2", 8.2),
        ("UTC+3", 6.7),
        ("UTC-5", 7.4),
        ("UTC-8", 4.9),
        ("UTC-3", 4.2),
    ],
    default_percent: 0.8,
};

pub static SCREEN_RESOLUTION_TABLE: ReferenceTable = ReferenceTable {
    source_citation: "StatCounter Global Stats, desktop screen resolution, July 2025",
    entries: &[
        ("1920x1080", 22.1),
        ("1366x768", 13.8),
        ("1536x864", 10.2),
        ("2560x1440", 7.1),
        ("1440x900", 5.9),
        ("1280x720", 4.8),
        ("3840x2160", 2.8),
    ],
    default_percent: 0.4,
};

pub static COLOR_DEPTH_TABLE: ReferenceTable = ReferenceTable {
    source_citation: "AmIUnique.org dataset (Laperdrix et al. 2016), color depth",
    entries: &[("24", 89.0), ("30", 6.0), ("16", 1.2)],
    default_percent: 0.5,
};

/// Keyed by canonical base density, after display-scaling disambiguation.
pub static PIXEL_RATIO_TABLE: ReferenceTable = ReferenceTable {
    source_citation: "AmIUnique.org dataset (Laperdrix et al. 2016), devicePixelRatio",
    entries: &[("2", 36.0), ("1", 28.0), ("1.5", 13.0), ("1.25", 11.0), ("3", 8.0)],
    default_percent: 1.5,
};

pub static CPU_CORES_TABLE: ReferenceTable = ReferenceTable {
    source_citation: "Steam Hardware Survey, physical CPU count, June 2025",
    entries: &[
        ("4", 31.8),
        ("8", 27.2),
        ("6", 13.5),
        ("2", 8.9),
        ("12", 6.8),
        ("16", 5.4),
        ("10", 3.1),
    ],
    default_percent: 1.0,
};

pub static DEVICE_MEMORY_TABLE: ReferenceTable = ReferenceTable {
    source_citation: "Steam Hardware Survey, system RAM (GB), June 2025",
    entries: &[("8", 37.9), ("16", 24.6), ("4", 17.3), ("32", 9.8), ("2", 4.1)],
    default_percent: 1.2,
};

// ---------------------------------------------------------------------------
// Baseline entropy records
// ---------------------------------------------------------------------------

const ECKERSLEY: &str = "Eckersley, How Unique Is Your Web Browser? (PETS 2010)";
const AMIUNIQUE: &str = "Laperdrix et al., Beauty and the Beast (S&P 2016), AmIUnique.org";
const HIDING: &str = "Gómez-Boix et al., Hiding in the Crowd (WWW 2018)";
const OPENWPM: &str = "Englehardt & Narayanan, Online Tracking: A 1-million-site Measurement (CCS 2016)";
const QUEIROZ: &str = "Queiroz & Feitosa, A Web Browser Fingerprinting Method (2019)";

pub static BASELINES: &[BaselineRecord] = &[
    BaselineRecord {
        attribute_key: "user_agent",
        bits: 7.42,
        source_citation: HIDING,
        note: "Fallback when the browser family token matches no table entry.",
        considered: &[
            StudyEstimate { study: ECKERSLEY, bits: 10.0, exclusion: None },
            StudyEstimate { study: AMIUNIQUE, bits: 9.78, exclusion: None },
            StudyEstimate { study: HIDING, bits: 7.42, exclusion: None },
        ],
    },
    BaselineRecord {
        attribute_key: "operating_system",
        bits: 1.92,
        source_citation: HIDING,
        note: "Platform string entropy.",
        considered: &[
            StudyEstimate { study: AMIUNIQUE, bits: 3.08, exclusion: None },
            StudyEstimate { study: HIDING, bits: 1.92, exclusion: None },
        ],
    },
    BaselineRecord {
        attribute_key: "language",
        bits: 2.72,
        source_citation: HIDING,
        note: "Primary content language.",
        considered: &[
            StudyEstimate { study: AMIUNIQUE, bits: 5.92, exclusion: None },
            StudyEstimate { study: HIDING, bits: 2.72, exclusion: None },
        ],
    },
    BaselineRecord {
        attribute_key: "timezone",
        bits: 0.67,
        source_citation: HIDING,
        note: "UTC offset only; named zones carry more but are not measured here.",
        considered: &[
            StudyEstimate { study: ECKERSLEY, bits: 3.04, exclusion: None },
            StudyEstimate { study: AMIUNIQUE, bits: 3.34, exclusion: None },
            StudyEstimate { study: HIDING, bits: 0.67, exclusion: None },
        ],
    },
    BaselineRecord {
        attribute_key: "cookies_enabled",
        bits: 0.25,
        source_citation: AMIUNIQUE,
        note: "Near-universally enabled; contributes little either way.",
        considered: &[
            StudyEstimate { study: ECKERSLEY, bits: 0.353, exclusion: None },
            StudyEstimate { study: AMIUNIQUE, bits: 0.25, exclusion: None },
        ],
    },
    BaselineRecord {
        attribute_key: "screen_resolution",
        bits: 3.05,
        source_citation: HIDING,
        note: "Width x height in CSS pixels.",
        considered: &[
            StudyEstimate { study: ECKERSLEY, bits: 4.83, exclusion: None },
            StudyEstimate { study: AMIUNIQUE, bits: 4.89, exclusion: None },
            StudyEstimate { study: HIDING, bits: 3.05, exclusion: None },
        ],
    },
    BaselineRecord {
        attribute_key: "color_depth",
        bits: 1.07,
        source_citation: HIDING,
        note: "Bits per pixel reported by the display stack.",
        considered: &[
            StudyEstimate { study: AMIUNIQUE, bits: 2.9, exclusion: None },
            StudyEstimate { study: HIDING, bits: 1.07, exclusion: None },
        ],
    },
    BaselineRecord {
        attribute_key: "pixel_ratio",
        bits: 1.33,
        source_citation: HIDING,
        note: "Canonical base density after scaling disambiguation.",
        considered: &[
            StudyEstimate { study: AMIUNIQUE, bits: 2.57, exclusion: None },
            StudyEstimate { study: HIDING, bits: 1.33, exclusion: None },
        ],
    },
    BaselineRecord {
        attribute_key: "cpu_cores",
        bits: 2.1,
        source_citation: QUEIROZ,
        note: "hardwareConcurrency-style logical core count.",
        considered: &[
            StudyEstimate { study: AMIUNIQUE, bits: 2.69, exclusion: None },
            StudyEstimate { study: QUEIROZ, bits: 2.1, exclusion: None },
        ],
    },
    BaselineRecord {
        attribute_key: "device_memory",
        bits: 1.9,
        source_citation: QUEIROZ,
        note: "Coarse-bucketed RAM size in GB.",
        considered: &[
            StudyEstimate { study: AMIUNIQUE, bits: 2.46, exclusion: None },
            StudyEstimate { study: QUEIROZ, bits: 1.9, exclusion: None },
        ],
    },
    BaselineRecord {
        attribute_key: "touch_support",
        bits: 0.95,
        source_citation: HIDING,
        note: "Touch points plus touch event support, folded to one flag.",
        considered: &[
            StudyEstimate { study: AMIUNIQUE, bits: 1.73, exclusion: None },
            StudyEstimate { study: HIDING, bits: 0.95, exclusion: None },
        ],
    },
    BaselineRecord {
        attribute_key: "do_not_track",
        bits: 0.94,
        source_citation: AMIUNIQUE,
        note: "Ironically, asking not to be tracked is itself identifying.",
        considered: &[
            StudyEstimate { study: AMIUNIQUE, bits: 0.94, exclusion: None },
            StudyEstimate { study: HIDING, bits: 1.19, exclusion: None },
        ],
    },
    BaselineRecord {
        attribute_key: "fonts",
        bits: 6.9,
        source_citation: HIDING,
        note: "Measured font metrics. Eckersley's 13.9 came from full plugin enumeration, long removed.",
        considered: &[
            StudyEstimate { study: ECKERSLEY, bits: 13.9, exclusion: None },
            StudyEstimate { study: AMIUNIQUE, bits: 8.0, exclusion: None },
            StudyEstimate { study: HIDING, bits: 6.9, exclusion: None },
        ],
    },
    BaselineRecord {
        attribute_key: "canvas",
        bits: 8.55,
        source_citation: AMIUNIQUE,
        note: "Rendered-pixel hash. The lower Hiding-in-the-Crowd figure is rejected by policy, see its exclusion.",
        considered: &[
            StudyEstimate { study: AMIUNIQUE, bits: 8.55, exclusion: None },
            StudyEstimate {
                study: HIDING,
                bits: 5.72,
                exclusion: Some(
                    "Population drawn from a single French retail site: one locale, one \
                     dominant platform mix. Adopting its lower figure would understate \
                     canvas entropy for a general population.",
                ),
            },
        ],
    },
    BaselineRecord {
        attribute_key: "webgl_vendor",
        bits: 2.28,
        source_citation: AMIUNIQUE,
        note: "Unmasked GPU vendor string.",
        considered: &[
            StudyEstimate { study: AMIUNIQUE, bits: 2.28, exclusion: None },
            StudyEstimate { study: HIDING, bits: 2.57, exclusion: None },
        ],
    },
    BaselineRecord {
        attribute_key: "webgl_renderer",
        bits: 4.93,
        source_citation: HIDING,
        note: "Unmasked GPU renderer string.",
        considered: &[
            StudyEstimate { study: AMIUNIQUE, bits: 5.71, exclusion: None },
            StudyEstimate { study: HIDING, bits: 4.93, exclusion: None },
        ],
    },
    BaselineRecord {
        attribute_key: "audio",
        bits: 4.6,
        source_citation: QUEIROZ,
        note: "Offline-rendered audio buffer signature.",
        considered: &[
            StudyEstimate { study: OPENWPM, bits: 5.4, exclusion: None },
            StudyEstimate { study: QUEIROZ, bits: 4.6, exclusion: None },
        ],
    },
];

/// Look up a baseline record by attribute key.
pub fn baseline(key: &str) -> Option<&'static BaselineRecord> {
    BASELINES.iter().find(|b| b.attribute_key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    static ALL_TABLES: &[&ReferenceTable] = &[
        &USER_AGENT_TABLE,
        &OPERATING_SYSTEM_TABLE,
        &LANGUAGE_TABLE,
        &TIMEZONE_TABLE,
        &SCREEN_RESOLUTION_TABLE,
        &COLOR_DEPTH_TABLE,
        &PIXEL_RATIO_TABLE,
        &CPU_CORES_TABLE,
        &DEVICE_MEMORY_TABLE,
    ];

    #[test]
    fn test_table_percents_in_range() {
        for table in ALL_TABLES {
            for (key, pct) in table.entries {
                assert!(
                    *pct > 0.0 && *pct <= 100.0,
                    "{key}: percent {pct} out of (0, 100]"
                );
            }
            assert!(table.default_percent > 0.0 && table.default_percent <= 100.0);
        }
    }

    #[test]
    fn test_baseline_bits_nonnegative() {
        for record in BASELINES {
            assert!(record.bits >= 0.0, "{}", record.attribute_key);
        }
    }

    #[test]
    fn test_baseline_is_minimum_of_non_excluded_candidates() {
        for record in BASELINES {
            let min = record
                .considered
                .iter()
                .filter(|c| c.exclusion.is_none())
                .map(|c| c.bits)
                .fold(f64::INFINITY, f64::min);
            assert!(
                (record.bits - min).abs() < 1e-9,
                "{}: selected {} but minimum non-excluded candidate is {}",
                record.attribute_key,
                record.bits,
                min
            );
        }
    }

    #[test]
    fn test_canvas_rejects_lower_excluded_candidate() {
        let canvas = baseline("canvas").unwrap();
        let excluded: Vec<_> = canvas
            .considered
            .iter()
            .filter(|c| c.exclusion.is_some())
            .collect();
        assert_eq!(excluded.len(), 1);
        // The excluded candidate is the numerical minimum, and it must NOT
        // have been selected.
        assert!(excluded[0].bits < canvas.bits);
        let true_min = canvas
            .considered
            .iter()
            .map(|c| c.bits)
            .fold(f64::INFINITY, f64::min);
        assert!((true_min - excluded[0].bits).abs() < 1e-9);
        assert!(canvas.bits > true_min);
    }

    #[test]
    fn test_baseline_lookup_by_key() {
        assert!(baseline("fonts").is_some());
        assert!(baseline("webgl_vendor").is_some());
        assert!(baseline("no_such_attribute").is_none());
    }
}
