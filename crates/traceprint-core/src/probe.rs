//! The probe boundary: one asynchronous detection per attribute.
//!
//! Probes are the sensor integrations this crate deliberately excludes —
//! screen geometry readers, canvas renderers, audio-buffer signatures. The
//! engine only sees this trait: `detect` resolves to a reading, to `None`
//! when the capability is absent on the platform, or to an error. Errors
//! never escalate past the orchestrator; they are logged and accounted as
//! unavailable.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// A probe's own lookup computation, carried alongside the raw value.
///
/// Used by composite probes whose observation spans two correlated
/// sub-signals (a GPU vendor/renderer pair, say) and whose entropy is
/// pre-summed before the engine sees it.
#[derive(Debug, Clone, Serialize)]
pub struct LookupOverride {
    /// Market share, when the probe resolved one.
    pub percent: Option<f64>,
    /// Citation for the percent.
    pub source: Option<String>,
    /// Short label for reports.
    pub source_label: String,
    pub estimated: bool,
    /// Pre-computed entropy contribution in bits.
    pub entropy: f64,
    pub one_in_x: f64,
    pub note: Option<String>,
}

/// One successful observation.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReading {
    /// The raw observed datum. Feeds lookup and the fingerprint hash.
    pub value: Value,
    /// Human-readable description of what was seen.
    pub message: String,
    /// Present when the probe computed its own entropy (see
    /// [`LookupOverride`]). Absent for plain readings.
    pub lookup: Option<LookupOverride>,
}

impl ProbeReading {
    /// A plain reading: raw value plus description, entropy left to the
    /// engine's resolution chain.
    pub fn new(value: Value, message: impl Into<String>) -> Self {
        Self {
            value,
            message: message.into(),
            lookup: None,
        }
    }
}

/// Failure inside a probe. Caught at the orchestrator boundary and demoted
/// to "unavailable" for accounting.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("probe backend failure: {0}")]
    Backend(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait every attribute probe implements.
///
/// `detect` may suspend (a probe waiting on a render-completion callback or
/// a short settle timer) but the orchestrator awaits it to completion before
/// touching the next attribute — probes never run concurrently.
#[async_trait]
pub trait AttributeProbe: Send + Sync {
    /// Detect one characteristic.
    ///
    /// - `Ok(Some(reading))` — success.
    /// - `Ok(None)` — the capability is absent here; non-fatal.
    /// - `Err(_)` — the probe failed; non-fatal, logged by the caller.
    async fn detect(&self) -> Result<Option<ProbeReading>, ProbeError>;
}
