//! Engine configuration: the fixed attribute sequence, reference data
//! bindings, and the display-population constant.
//!
//! All of this is constructed once and passed by reference into the
//! orchestrator and aggregator. Nothing here is ambient or mutable.

use serde::Serialize;

use crate::reference::{
    self, BaselineRecord, COLOR_DEPTH_TABLE, CPU_CORES_TABLE, DEVICE_MEMORY_TABLE, LANGUAGE_TABLE,
    OPERATING_SYSTEM_TABLE, PIXEL_RATIO_TABLE, ReferenceTable, SCREEN_RESOLUTION_TABLE,
    TIMEZONE_TABLE, USER_AGENT_TABLE,
};

/// Estimated global online population. Used only to cap the *displayed*
/// anonymity-set size; the true cumulative bit count is never clamped.
pub const WORLD_POPULATION: f64 = 8.0e9;

/// How hard a value is to change without breaking the platform underneath.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    Easy,
    Medium,
    Hard,
}

impl std::fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Medium => write!(f, "medium"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

/// One attribute in the processing sequence: key, spoofability metadata, and
/// how its entropy is sourced (table, baseline, or a two-part combination).
#[derive(Debug, Clone, Copy)]
pub struct AttributeSpec {
    /// Stable identifier, also the probe-registry key.
    pub key: &'static str,
    /// Human-readable name for reports.
    pub label: &'static str,
    pub difficulty: DifficultyTier,
    /// One-line description of what changing this value costs.
    pub change_difficulty: &'static str,
    /// Market-share table, when a direct lookup exists.
    pub table: Option<&'static ReferenceTable>,
    /// Baseline record key, used when lookup misses or no table exists.
    pub baseline_key: Option<&'static str>,
    /// Two baseline keys whose bits are summed, for inherently two-part
    /// observations. Applies only when the probe did not pre-sum them.
    pub combine_baselines: Option<[&'static str; 2]>,
    /// Route the raw reading through display-scale disambiguation and look
    /// up the recovered base density instead of the raw value.
    pub pixel_ratio_bucketing: bool,
}

/// The fixed processing sequence. The order is a design decision, not an
/// artifact: simple, high-compatibility attributes come first so the running
/// totals build a coherent narrative, and the partial-match lookup tier
/// depends on each table's declared entry order.
pub static ATTRIBUTE_SEQUENCE: &[AttributeSpec] = &[
    AttributeSpec {
        key: "user_agent",
        label: "Browser",
        difficulty: DifficultyTier::Easy,
        change_difficulty: "Install a different browser, or spoof the string outright.",
        table: Some(&USER_AGENT_TABLE),
        baseline_key: Some("user_agent"),
        combine_baselines: None,
        pixel_ratio_bucketing: false,
    },
    AttributeSpec {
        key: "operating_system",
        label: "Operating system",
        difficulty: DifficultyTier::Hard,
        change_difficulty: "Changing OS means changing machines or dual-booting.",
        table: Some(&OPERATING_SYSTEM_TABLE),
        baseline_key: Some("operating_system"),
        combine_baselines: None,
        pixel_ratio_bucketing: false,
    },
    AttributeSpec {
        key: "language",
        label: "Language",
        difficulty: DifficultyTier::Easy,
        change_difficulty: "A settings toggle, but it degrades every localized page.",
        table: Some(&LANGUAGE_TABLE),
        baseline_key: Some("language"),
        combine_baselines: None,
        pixel_ratio_bucketing: false,
    },
    AttributeSpec {
        key: "timezone",
        label: "Timezone",
        difficulty: DifficultyTier::Medium,
        change_difficulty: "Faking it breaks every displayed clock and calendar.",
        table: Some(&TIMEZONE_TABLE),
        baseline_key: Some("timezone"),
        combine_baselines: None,
        pixel_ratio_bucketing: false,
    },
    AttributeSpec {
        key: "cookies_enabled",
        label: "Cookies enabled",
        difficulty: DifficultyTier::Easy,
        change_difficulty: "One toggle, but half the web stops working.",
        table: None,
        baseline_key: Some("cookies_enabled"),
        combine_baselines: None,
        pixel_ratio_bucketing: false,
    },
    AttributeSpec {
        key: "screen_resolution",
        label: "Screen resolution",
        difficulty: DifficultyTier::Medium,
        change_difficulty: "Lowering resolution is possible but visibly degrades the display.",
        table: Some(&SCREEN_RESOLUTION_TABLE),
        baseline_key: Some("screen_resolution"),
        combine_baselines: None,
        pixel_ratio_bucketing: false,
    },
    AttributeSpec {
        key: "color_depth",
        label: "Color depth",
        difficulty: DifficultyTier::Hard,
        change_difficulty: "Fixed by the display hardware and driver.",
        table: Some(&COLOR_DEPTH_TABLE),
        baseline_key: Some("color_depth"),
        combine_baselines: None,
        pixel_ratio_bucketing: false,
    },
    AttributeSpec {
        key: "pixel_ratio",
        label: "Display density",
        difficulty: DifficultyTier::Medium,
        change_difficulty: "Zoom changes the reading but the base density shows through.",
        table: Some(&PIXEL_RATIO_TABLE),
        baseline_key: Some("pixel_ratio"),
        combine_baselines: None,
        pixel_ratio_bucketing: true,
    },
    AttributeSpec {
        key: "cpu_cores",
        label: "CPU cores",
        difficulty: DifficultyTier::Hard,
        change_difficulty: "Hardware. Only a different machine changes it.",
        table: Some(&CPU_CORES_TABLE),
        baseline_key: Some("cpu_cores"),
        combine_baselines: None,
        pixel_ratio_bucketing: false,
    },
    AttributeSpec {
        key: "device_memory",
        label: "Device memory",
        difficulty: DifficultyTier::Hard,
        change_difficulty: "Hardware, coarsely bucketed but still identifying.",
        table: Some(&DEVICE_MEMORY_TABLE),
        baseline_key: Some("device_memory"),
        combine_baselines: None,
        pixel_ratio_bucketing: false,
    },
    AttributeSpec {
        key: "touch_support",
        label: "Touch support",
        difficulty: DifficultyTier::Hard,
        change_difficulty: "Either the device has a touchscreen or it does not.",
        table: None,
        baseline_key: Some("touch_support"),
        combine_baselines: None,
        pixel_ratio_bucketing: false,
    },
    AttributeSpec {
        key: "do_not_track",
        label: "Do Not Track",
        difficulty: DifficultyTier::Easy,
        change_difficulty: "A toggle — and either setting is itself a signal.",
        table: None,
        baseline_key: Some("do_not_track"),
        combine_baselines: None,
        pixel_ratio_bucketing: false,
    },
    AttributeSpec {
        key: "fonts",
        label: "Font metrics",
        difficulty: DifficultyTier::Medium,
        change_difficulty: "Installing or removing fonts shifts it; hiding it breaks rendering.",
        table: None,
        baseline_key: Some("fonts"),
        combine_baselines: None,
        pixel_ratio_bucketing: false,
    },
    AttributeSpec {
        key: "canvas",
        label: "Canvas rendering",
        difficulty: DifficultyTier::Hard,
        change_difficulty: "Tied to GPU, driver, and font stack; spoofing is detectable.",
        table: None,
        baseline_key: Some("canvas"),
        combine_baselines: None,
        pixel_ratio_bucketing: false,
    },
    AttributeSpec {
        key: "webgl",
        label: "WebGL vendor/renderer",
        difficulty: DifficultyTier::Hard,
        change_difficulty: "Reports the actual GPU; masking it is itself rare and identifying.",
        table: None,
        baseline_key: None,
        combine_baselines: Some(["webgl_vendor", "webgl_renderer"]),
        pixel_ratio_bucketing: false,
    },
    AttributeSpec {
        key: "audio",
        label: "Audio signature",
        difficulty: DifficultyTier::Hard,
        change_difficulty: "Determined by the audio stack; stable across sessions.",
        table: None,
        baseline_key: Some("audio"),
        combine_baselines: None,
        pixel_ratio_bucketing: false,
    },
];

/// Immutable configuration for one engine instance.
///
/// Built once (normally via [`EngineConfig::builtin`]) and shared by
/// reference; nothing mutates it after construction.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Display cap for the anonymity-set size.
    pub population: f64,
    /// Ordered processing sequence.
    pub attributes: &'static [AttributeSpec],
    /// Baseline entropy records, keyed by attribute.
    pub baselines: &'static [BaselineRecord],
}

impl EngineConfig {
    /// The built-in catalog: 16 attributes, world-population display cap.
    pub fn builtin() -> Self {
        Self {
            population: WORLD_POPULATION,
            attributes: ATTRIBUTE_SEQUENCE,
            baselines: reference::BASELINES,
        }
    }

    /// Same catalog with a different display-cap population. Tests use this
    /// to exercise the cap without forty-plus accumulated bits.
    pub fn with_population(population: f64) -> Self {
        Self {
            population,
            ..Self::builtin()
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&AttributeSpec> {
        self.attributes.iter().find(|a| a.key == key)
    }

    pub fn baseline(&self, key: &str) -> Option<&BaselineRecord> {
        self.baselines.iter().find(|b| b.attribute_key == key)
    }
}
