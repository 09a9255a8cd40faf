//! # traceprint-core
//!
//! **How identifiable is this device?**
//!
//! `traceprint-core` turns a set of observable device characteristics into a
//! measurable privacy argument: each observed value becomes an
//! information-theoretic contribution in entropy bits, the bits accumulate
//! across attributes, and `2^total` estimates the anonymity set — the number
//! of people expected to share the full combination.
//!
//! ## Quick start
//!
//! ```no_run
//! use traceprint_core::{EngineConfig, NullSink, ProbeSet, TestOrchestrator};
//!
//! # async fn demo() {
//! let config = EngineConfig::builtin();
//! let orchestrator = TestOrchestrator::new(&config);
//! let probes = ProbeSet::new(); // register AttributeProbe implementations
//! let report = orchestrator.run(&probes, &mut NullSink).await;
//! println!(
//!     "{:.1} bits -> 1 in {:.0}",
//!     report.final_entropy_bits, report.final_anonymity_set_display
//! );
//! # }
//! ```
//!
//! ## Architecture
//!
//! Probes → Orchestrator → Lookup/Baselines → Aggregation → Report + Hash
//!
//! - Reference data (market-share tables, study-derived baselines) is static
//!   and immutable; baselines are conservative minimums across studies.
//! - Each observation's bits come from an explicit five-tier resolution
//!   chain (lookup match, probe-supplied, combination rule, baseline,
//!   conservative fallback).
//! - The orchestrator awaits one probe at a time, survives any probe
//!   failure, and finishes with a deterministic SHA-256 fingerprint of the
//!   ordered raw values.
//!
//! The engine assumes attribute independence, persists nothing, and treats
//! the fingerprint as an identifier, not a security primitive.

pub mod config;
pub mod entropy;
pub mod hash;
pub mod lookup;
pub mod orchestrator;
pub mod pixel_ratio;
pub mod probe;
pub mod reference;
pub mod report;

pub use config::{ATTRIBUTE_SEQUENCE, AttributeSpec, DifficultyTier, EngineConfig, WORLD_POPULATION};
pub use entropy::{
    AggregateState, CONSERVATIVE_FALLBACK_BITS, ENTROPY_CLAMP_BITS, ONE_IN_X_CLAMP,
    ResolutionOrigin, ResolvedEntropy, anonymity_set_size, entropy_bits, one_in_x,
};
pub use hash::{canonical_form, fingerprint};
pub use lookup::{LookupResult, resolve};
pub use orchestrator::{ProbeSet, TestOrchestrator};
pub use pixel_ratio::{
    CANONICAL_BASE_RATIOS, CANONICAL_SCALE_PERCENTS, Confidence, DisambiguationResult,
    disambiguate,
};
pub use probe::{AttributeProbe, LookupOverride, ProbeError, ProbeReading};
pub use reference::{BaselineRecord, ReferenceTable, StudyEstimate};
pub use report::{
    AttributeSummary, CollectingSink, NullSink, ObservationRecord, ProgressSink, RunReport,
    StepRecord,
};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
