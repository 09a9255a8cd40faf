//! Sequential run loop: drive every probe in the fixed attribute order,
//! classify outcomes, feed successes through lookup and aggregation, and
//! assemble the terminal report.
//!
//! Single logical thread of control. Each probe is awaited to completion
//! before the next starts; the orchestrator is the sole mutator of the
//! aggregate state, so nothing here needs a lock. There is no per-probe
//! timeout: a probe that never resolves stalls the run. That gap is
//! inherited from the original design and kept deliberately rather than
//! inventing timeout semantics.

use std::collections::HashMap;

use log::warn;
use serde_json::Value;

use crate::config::EngineConfig;
use crate::entropy::{self, AggregateState, ResolutionInput};
use crate::hash;
use crate::lookup;
use crate::pixel_ratio;
use crate::probe::AttributeProbe;
use crate::report::{
    AttributeSummary, ObservationRecord, ProgressSink, RunReport, StepRecord,
};

/// Probes keyed by attribute. Attributes with no registered probe are
/// accounted as unavailable.
#[derive(Default)]
pub struct ProbeSet {
    probes: HashMap<&'static str, Box<dyn AttributeProbe>>,
}

impl ProbeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a probe for one attribute key. Replaces any existing probe
    /// for that key.
    pub fn register(&mut self, key: &'static str, probe: Box<dyn AttributeProbe>) {
        self.probes.insert(key, probe);
    }

    pub fn get(&self, key: &str) -> Option<&dyn AttributeProbe> {
        self.probes.get(key).map(|b| b.as_ref())
    }

    pub fn len(&self) -> usize {
        self.probes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }
}

/// Drives one run over the configured attribute sequence.
pub struct TestOrchestrator<'a> {
    config: &'a EngineConfig,
}

impl<'a> TestOrchestrator<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Run every configured attribute, in order, to completion.
    ///
    /// Probe failures never abort the run: an erroring or unavailable probe
    /// lands in `failed_attribute_names` and processing continues. All state
    /// is fresh per call; there is no carry-over between runs.
    pub async fn run(&self, probes: &ProbeSet, sink: &mut dyn ProgressSink) -> RunReport {
        let mut state = AggregateState::new();
        let mut failed_attribute_names: Vec<String> = Vec::new();
        let mut observations: Vec<ObservationRecord> = Vec::new();
        let mut attribute_summaries: Vec<AttributeSummary> = Vec::new();
        let mut raw_values: Vec<Value> = Vec::new();

        for attribute in self.config.attributes {
            let reading = match probes.get(attribute.key) {
                None => None,
                Some(probe) => match probe.detect().await {
                    Ok(reading) => reading,
                    Err(err) => {
                        warn!("probe '{}' failed: {err}", attribute.key);
                        None
                    }
                },
            };

            let Some(reading) = reading else {
                failed_attribute_names.push(attribute.key.to_string());
                continue;
            };

            // Table lookup, against the disambiguated bucket for display
            // density and the plain string form otherwise.
            let lookup_key = if attribute.pixel_ratio_bucketing {
                reading
                    .value
                    .as_f64()
                    .map(|raw| pixel_ratio::disambiguate(raw).matched_bucket_key)
            } else {
                None
            }
            .unwrap_or_else(|| value_as_lookup_string(&reading.value));

            let lookup = attribute
                .table
                .map(|table| lookup::resolve(table, &lookup_key));

            let resolved = entropy::resolve_entropy(&ResolutionInput {
                config: self.config,
                attribute,
                lookup: lookup.as_ref(),
                probe_lookup: reading.lookup.as_ref(),
            });

            let acc = state.accumulate(resolved.bits, self.config.population);

            observations.push(ObservationRecord {
                attribute: attribute.key.to_string(),
                raw_value: reading.value.clone(),
                percent: resolved.percent,
                estimated: resolved.estimated,
                entropy_bits: acc.step_bits,
                source_citation: resolved.source_citation.clone(),
                note: resolved.note.clone(),
                origin: resolved.origin,
            });
            attribute_summaries.push(AttributeSummary {
                name: attribute.label.to_string(),
                difficulty_tier: attribute.difficulty,
                change_difficulty: attribute.change_difficulty.to_string(),
                entropy_bits: acc.step_bits,
            });
            raw_values.push(reading.value);

            sink.on_step(&StepRecord {
                attribute: attribute.key.to_string(),
                message: reading.message,
                entropy_bits: acc.step_bits,
                one_in_x: resolved
                    .percent
                    .map(entropy::one_in_x)
                    .unwrap_or_else(|| entropy::anonymity_set_size(acc.step_bits)),
                source_citation: resolved.source_citation,
                estimated: resolved.estimated,
                cumulative_bits: acc.cumulative_bits,
                crossed_uniqueness_now: acc.crossed_cap_now,
            });
        }

        let fingerprint_hash = hash::fingerprint(&raw_values);

        RunReport {
            successful_count: observations.len(),
            failed_attribute_names,
            observations,
            attribute_summaries,
            fingerprint_hash,
            final_entropy_bits: state.cumulative_bits,
            final_anonymity_set_display: state.display_anonymity_set(self.config.population),
            population_capped: state.ever_capped,
        }
    }
}

/// String form of a raw value for table lookup. Strings are used verbatim;
/// everything else takes its JSON rendering ("8", "true", ...).
fn value_as_lookup_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{ProbeError, ProbeReading};
    use crate::report::CollectingSink;
    use async_trait::async_trait;
    use serde_json::json;

    struct StaticProbe {
        reading: ProbeReading,
    }

    #[async_trait]
    impl AttributeProbe for StaticProbe {
        async fn detect(&self) -> Result<Option<ProbeReading>, ProbeError> {
            Ok(Some(self.reading.clone()))
        }
    }

    struct UnavailableProbe;

    #[async_trait]
    impl AttributeProbe for UnavailableProbe {
        async fn detect(&self) -> Result<Option<ProbeReading>, ProbeError> {
            Ok(None)
        }
    }

    struct FailingProbe;

    #[async_trait]
    impl AttributeProbe for FailingProbe {
        async fn detect(&self) -> Result<Option<ProbeReading>, ProbeError> {
            Err(ProbeError::Backend("sensor exploded".to_string()))
        }
    }

    fn static_probe(value: Value, message: &str) -> Box<dyn AttributeProbe> {
        Box::new(StaticProbe {
            reading: ProbeReading::new(value, message),
        })
    }

    #[tokio::test]
    async fn test_empty_probe_set_all_unavailable() {
        let config = EngineConfig::builtin();
        let orchestrator = TestOrchestrator::new(&config);
        let mut sink = CollectingSink::default();
        let report = orchestrator.run(&ProbeSet::new(), &mut sink).await;

        assert_eq!(report.successful_count, 0);
        assert_eq!(report.failed_attribute_names.len(), config.attributes.len());
        assert_eq!(report.final_entropy_bits, 0.0);
        assert!(sink.steps.is_empty());
        // An empty run still produces a (degenerate) hash.
        assert_eq!(report.fingerprint_hash.len(), 64);
    }

    #[tokio::test]
    async fn test_failing_probe_does_not_abort_run() {
        let config = EngineConfig::builtin();
        let orchestrator = TestOrchestrator::new(&config);

        let mut probes = ProbeSet::new();
        probes.register("user_agent", Box::new(FailingProbe));
        probes.register("operating_system", static_probe(json!("Linux"), "Linux"));
        probes.register("language", static_probe(json!("en-US"), "en-US"));

        let mut sink = CollectingSink::default();
        let report = orchestrator.run(&probes, &mut sink).await;

        assert!(
            report
                .failed_attribute_names
                .contains(&"user_agent".to_string())
        );
        assert_eq!(report.successful_count, 2);
        // Later attributes still processed, in the original order.
        assert_eq!(sink.steps[0].attribute, "operating_system");
        assert_eq!(sink.steps[1].attribute, "language");
    }

    #[tokio::test]
    async fn test_unavailable_and_error_accounted_identically() {
        let config = EngineConfig::builtin();
        let orchestrator = TestOrchestrator::new(&config);

        let mut probes = ProbeSet::new();
        probes.register("user_agent", Box::new(FailingProbe));
        probes.register("operating_system", Box::new(UnavailableProbe));

        let report = orchestrator
            .run(&probes, &mut crate::report::NullSink)
            .await;
        assert!(
            report
                .failed_attribute_names
                .contains(&"user_agent".to_string())
        );
        assert!(
            report
                .failed_attribute_names
                .contains(&"operating_system".to_string())
        );
        assert_eq!(report.successful_count, 0);
    }

    #[tokio::test]
    async fn test_pixel_ratio_reading_looked_up_by_bucket() {
        let config = EngineConfig::builtin();
        let orchestrator = TestOrchestrator::new(&config);

        let mut probes = ProbeSet::new();
        // 1.1 disambiguates to base 1.0 at 110% zoom; the table lookup must
        // hit the "1" bucket (28%), a real match.
        probes.register("pixel_ratio", static_probe(json!(1.1), "ratio 1.1"));

        let mut sink = CollectingSink::default();
        let report = orchestrator.run(&probes, &mut sink).await;

        assert_eq!(report.successful_count, 1);
        let obs = &report.observations[0];
        assert_eq!(obs.percent, Some(28.0));
        assert!(!obs.estimated);
    }

    #[tokio::test]
    async fn test_runs_are_independent() {
        let config = EngineConfig::builtin();
        let orchestrator = TestOrchestrator::new(&config);
        let mut probes = ProbeSet::new();
        probes.register("language", static_probe(json!("en-US"), "en-US"));

        let first = orchestrator.run(&probes, &mut crate::report::NullSink).await;
        let second = orchestrator.run(&probes, &mut crate::report::NullSink).await;

        // No carry-over: identical fresh state both times.
        assert_eq!(first.final_entropy_bits, second.final_entropy_bits);
        assert_eq!(first.fingerprint_hash, second.fingerprint_hash);
    }

    #[tokio::test]
    async fn test_summaries_carry_spoofability_metadata() {
        let config = EngineConfig::builtin();
        let orchestrator = TestOrchestrator::new(&config);
        let mut probes = ProbeSet::new();
        probes.register("cpu_cores", static_probe(json!(8), "8 cores"));

        let report = orchestrator.run(&probes, &mut crate::report::NullSink).await;
        assert_eq!(report.attribute_summaries.len(), 1);
        let summary = &report.attribute_summaries[0];
        assert_eq!(summary.name, "CPU cores");
        assert!(!summary.change_difficulty.is_empty());
        assert!(summary.entropy_bits > 0.0);
    }
}
