//! Reporting types: the per-step progress stream and the terminal run
//! report. Rendering layers subscribe to [`ProgressSink`]; the engine never
//! reaches into presentation concerns.

use serde::Serialize;
use serde_json::Value;

use crate::config::DifficultyTier;
use crate::entropy::ResolutionOrigin;

/// One entry in the incremental progress stream, emitted after each
/// successfully processed attribute. A side effect with no further
/// consequence to engine state.
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub attribute: String,
    pub message: String,
    pub entropy_bits: f64,
    pub one_in_x: f64,
    pub source_citation: String,
    pub estimated: bool,
    pub cumulative_bits: f64,
    /// True only on the step that first pushed the anonymity set past the
    /// display population.
    pub crossed_uniqueness_now: bool,
}

/// Immutable summary of one resolved observation.
#[derive(Debug, Clone, Serialize)]
pub struct ObservationRecord {
    pub attribute: String,
    pub raw_value: Value,
    pub percent: Option<f64>,
    pub estimated: bool,
    pub entropy_bits: f64,
    pub source_citation: String,
    pub note: Option<String>,
    pub origin: ResolutionOrigin,
}

/// Spoofability triple for the downstream summary.
#[derive(Debug, Clone, Serialize)]
pub struct AttributeSummary {
    pub name: String,
    pub difficulty_tier: DifficultyTier,
    pub change_difficulty: String,
    pub entropy_bits: f64,
}

/// Terminal report for one run. Built once at the end; a new run starts
/// from nothing.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub successful_count: usize,
    pub failed_attribute_names: Vec<String>,
    pub observations: Vec<ObservationRecord>,
    pub attribute_summaries: Vec<AttributeSummary>,
    pub fingerprint_hash: String,
    pub final_entropy_bits: f64,
    /// Anonymity-set size capped at the configured population.
    pub final_anonymity_set_display: f64,
    pub population_capped: bool,
}

/// Consumer of the per-step stream.
pub trait ProgressSink {
    fn on_step(&mut self, step: &StepRecord);
}

/// Discards every step. For callers that only want the terminal report.
#[derive(Debug, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn on_step(&mut self, _step: &StepRecord) {}
}

/// Buffers every step. Used by tests and by batch consumers.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub steps: Vec<StepRecord>,
}

impl ProgressSink for CollectingSink {
    fn on_step(&mut self, step: &StepRecord) {
        self.steps.push(step.clone());
    }
}
