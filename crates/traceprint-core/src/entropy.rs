//! Entropy arithmetic and the per-observation resolution chain.
//!
//! The formulas are the whole privacy argument in three lines: a value seen
//! in `p` percent of the population carries `log2(100 / p)` bits, and `n`
//! accumulated bits put the device in an anonymity set of `2^n`.
//!
//! The resolution chain decides where each observation's bits come from. The
//! five tiers are an explicit ordered list, tried in sequence, first
//! applicable wins:
//!
//! 1. a real table-lookup match,
//! 2. probe-supplied entropy (composite observations, pre-summed),
//! 3. an attribute-specific combination of two named baselines,
//! 4. the attribute's baseline record (lookup missed or no table),
//! 5. a conservative 1.0-bit fallback with a warning — reaching this tier
//!    means the static data is incomplete, and tests assert it unreachable
//!    for every configured attribute.

use log::warn;
use serde::Serialize;

use crate::config::{AttributeSpec, EngineConfig};
use crate::lookup::LookupResult;
use crate::probe::LookupOverride;

/// Entropy assigned when a percent is zero or negative. A defensive numeric
/// guard, not meaningful data.
pub const ENTROPY_CLAMP_BITS: f64 = 10.0;

/// "1 in X" value under the same guard condition.
pub const ONE_IN_X_CLAMP: f64 = 1000.0;

/// Bits contributed by the missing-configuration fallback tier.
pub const CONSERVATIVE_FALLBACK_BITS: f64 = 1.0;

/// Bits of information in a value shared by `percent` of the population.
pub fn entropy_bits(percent: f64) -> f64 {
    if percent <= 0.0 {
        return ENTROPY_CLAMP_BITS;
    }
    (100.0 / percent).log2()
}

/// "1 in X people share this value."
pub fn one_in_x(percent: f64) -> f64 {
    if percent <= 0.0 {
        return ONE_IN_X_CLAMP;
    }
    100.0 / percent
}

/// Expected number of people sharing all observed values so far.
pub fn anonymity_set_size(bits_total: f64) -> f64 {
    2.0_f64.powf(bits_total)
}

// ---------------------------------------------------------------------------
// Accumulation
// ---------------------------------------------------------------------------

/// Running totals across one run. Owned and mutated only by the
/// orchestrator, one update per successfully processed observation.
///
/// `cumulative_bits` is monotonically non-decreasing and is never capped —
/// only the displayed anonymity-set size is. Clamping the true sum would
/// silently lose information for anyone combining results further.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregateState {
    pub cumulative_bits: f64,
    pub processed_count: usize,
    /// Set once the uncapped anonymity set first reaches the population.
    pub ever_capped: bool,
}

/// What one accumulation step did, for the progress stream.
#[derive(Debug, Clone, Copy)]
pub struct StepAccumulation {
    pub step_bits: f64,
    pub cumulative_bits: f64,
    /// True only on the step that first crossed the population cap.
    pub crossed_cap_now: bool,
}

impl AggregateState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one observation's bits. `population` is the display cap.
    pub fn accumulate(&mut self, bits: f64, population: f64) -> StepAccumulation {
        // Contributions are >= 0 by construction (percents are <= 100);
        // guard anyway so the monotonicity invariant survives bad data.
        let step_bits = bits.max(0.0);
        self.cumulative_bits += step_bits;
        self.processed_count += 1;

        let crossed_cap_now =
            !self.ever_capped && anonymity_set_size(self.cumulative_bits) >= population;
        if crossed_cap_now {
            self.ever_capped = true;
        }

        StepAccumulation {
            step_bits,
            cumulative_bits: self.cumulative_bits,
            crossed_cap_now,
        }
    }

    /// Anonymity-set size for display, capped at the population.
    pub fn display_anonymity_set(&self, population: f64) -> f64 {
        anonymity_set_size(self.cumulative_bits).min(population)
    }
}

// ---------------------------------------------------------------------------
// Resolution chain
// ---------------------------------------------------------------------------

/// Which tier of the chain produced an observation's bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionOrigin {
    LookupMatch,
    ProbeSupplied,
    CombinationRule,
    Baseline,
    MissingConfiguration,
}

/// One observation's resolved entropy contribution.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedEntropy {
    pub bits: f64,
    /// Market share behind the bits, when one exists.
    pub percent: Option<f64>,
    /// False only for a real lookup match.
    pub estimated: bool,
    pub source_citation: String,
    pub note: Option<String>,
    pub origin: ResolutionOrigin,
}

/// Everything a strategy may consider for one observation.
pub struct ResolutionInput<'a> {
    pub config: &'a EngineConfig,
    pub attribute: &'a AttributeSpec,
    /// Engine-run table lookup, when the attribute has a table.
    pub lookup: Option<&'a LookupResult>,
    /// Probe-supplied lookup, when the probe computed its own.
    pub probe_lookup: Option<&'a LookupOverride>,
}

type Strategy = for<'a> fn(&ResolutionInput<'a>) -> Option<ResolvedEntropy>;

/// The chain itself, in priority order. Kept as data so the order is
/// auditable and each tier independently testable.
pub static RESOLUTION_STRATEGIES: &[(&str, Strategy)] = &[
    ("lookup-match", lookup_match),
    ("probe-supplied", probe_supplied),
    ("combination-rule", combination_rule),
    ("baseline", baseline_fallback),
    ("missing-configuration", missing_configuration),
];

/// Run the chain; the first applicable tier wins.
pub fn resolve_entropy(input: &ResolutionInput<'_>) -> ResolvedEntropy {
    for (name, strategy) in RESOLUTION_STRATEGIES {
        if let Some(resolved) = strategy(input) {
            log::debug!(
                "{}: {:.2} bits via {}",
                input.attribute.key,
                resolved.bits,
                name
            );
            return resolved;
        }
    }
    // The last tier is total; this is belt-and-suspenders for the compiler.
    conservative_fallback(input.attribute)
}

fn lookup_match(input: &ResolutionInput<'_>) -> Option<ResolvedEntropy> {
    let lookup = input.lookup?;
    if lookup.estimated {
        return None;
    }
    let table = input.attribute.table?;
    Some(ResolvedEntropy {
        bits: entropy_bits(lookup.percent),
        percent: Some(lookup.percent),
        estimated: false,
        source_citation: table.source_citation.to_string(),
        note: None,
        origin: ResolutionOrigin::LookupMatch,
    })
}

fn probe_supplied(input: &ResolutionInput<'_>) -> Option<ResolvedEntropy> {
    let supplied = input.probe_lookup?;
    Some(ResolvedEntropy {
        bits: supplied.entropy,
        percent: supplied.percent,
        estimated: supplied.estimated,
        source_citation: supplied
            .source
            .clone()
            .unwrap_or_else(|| supplied.source_label.clone()),
        note: supplied.note.clone(),
        origin: ResolutionOrigin::ProbeSupplied,
    })
}

fn combination_rule(input: &ResolutionInput<'_>) -> Option<ResolvedEntropy> {
    let [first_key, second_key] = input.attribute.combine_baselines?;
    let first = input.config.baseline(first_key)?;
    let second = input.config.baseline(second_key)?;
    Some(ResolvedEntropy {
        bits: first.bits + second.bits,
        percent: None,
        estimated: true,
        source_citation: format!("{} + {}", first.source_citation, second.source_citation),
        note: Some(format!(
            "Two-part observation: {first_key} ({:.2} bits) + {second_key} ({:.2} bits)",
            first.bits, second.bits
        )),
        origin: ResolutionOrigin::CombinationRule,
    })
}

fn baseline_fallback(input: &ResolutionInput<'_>) -> Option<ResolvedEntropy> {
    let record = input.config.baseline(input.attribute.baseline_key?)?;
    Some(ResolvedEntropy {
        bits: record.bits,
        percent: None,
        estimated: true,
        source_citation: record.source_citation.to_string(),
        note: Some(record.note.to_string()),
        origin: ResolutionOrigin::Baseline,
    })
}

fn missing_configuration(input: &ResolutionInput<'_>) -> Option<ResolvedEntropy> {
    Some(conservative_fallback(input.attribute))
}

fn conservative_fallback(attribute: &AttributeSpec) -> ResolvedEntropy {
    warn!(
        "no entropy configuration for attribute '{}'; using conservative {} bit fallback",
        attribute.key, CONSERVATIVE_FALLBACK_BITS
    );
    ResolvedEntropy {
        bits: CONSERVATIVE_FALLBACK_BITS,
        percent: None,
        estimated: true,
        source_citation: "unconfigured attribute".to_string(),
        note: Some("No lookup table or baseline record covers this attribute.".to_string()),
        origin: ResolutionOrigin::MissingConfiguration,
    }
}
