//! Canned readings for a typical mid-2025 desktop browser.
//!
//! The demo set exists so every engine path is visible in one deterministic
//! run: partial-match lookup on a full user-agent string, display-scale
//! disambiguation at a non-canonical 1.1 reading, a probe-supplied
//! pre-summed WebGL pair, and plain baseline fallbacks for the rendered
//! signatures.

use async_trait::async_trait;
use serde_json::json;
use traceprint_core::ProbeSet;
use traceprint_core::probe::{AttributeProbe, LookupOverride, ProbeError, ProbeReading};
use traceprint_core::{anonymity_set_size, reference};

/// A probe that always returns the same reading.
struct CannedProbe {
    reading: ProbeReading,
}

#[async_trait]
impl AttributeProbe for CannedProbe {
    async fn detect(&self) -> Result<Option<ProbeReading>, ProbeError> {
        Ok(Some(self.reading.clone()))
    }
}

fn canned(value: serde_json::Value, message: &str) -> Box<dyn AttributeProbe> {
    Box::new(CannedProbe {
        reading: ProbeReading::new(value, message),
    })
}

/// The full demo probe set, one probe per configured attribute.
pub fn build() -> ProbeSet {
    let mut probes = ProbeSet::new();

    probes.register(
        "user_agent",
        canned(
            json!(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36"
            ),
            "Browser: Chrome 126 on Windows",
        ),
    );
    probes.register(
        "operating_system",
        canned(json!("Windows"), "Operating system: Windows"),
    );
    probes.register("language", canned(json!("en-US"), "Preferred language: en-US"));
    probes.register("timezone", canned(json!("UTC+1"), "Timezone: UTC+1"));
    probes.register(
        "cookies_enabled",
        canned(json!(true), "Cookies: enabled"),
    );
    probes.register(
        "screen_resolution",
        canned(json!("1920x1080"), "Screen: 1920x1080"),
    );
    probes.register("color_depth", canned(json!(24), "Color depth: 24-bit"));
    probes.register(
        "pixel_ratio",
        canned(json!(1.1), "Display density reading: 1.1 (1.0 panel at 110% zoom)"),
    );
    probes.register("cpu_cores", canned(json!(8), "Logical CPU cores: 8"));
    probes.register("device_memory", canned(json!(16), "System memory: 16 GB"));
    probes.register(
        "touch_support",
        canned(json!(false), "Touch support: none"),
    );
    probes.register(
        "do_not_track",
        canned(json!("1"), "Do Not Track: requested"),
    );
    probes.register(
        "fonts",
        canned(
            json!(["Arial", "Calibri", "Cambria", "Segoe UI", "Tahoma", "Verdana"]),
            "Measured fonts: 6 of 6 common families present",
        ),
    );
    probes.register(
        "canvas",
        canned(
            json!("a41c19d4e0b77f2c"),
            "Canvas rendering signature: a41c19d4e0b77f2c",
        ),
    );
    probes.register("webgl", Box::new(webgl_probe()));
    probes.register(
        "audio",
        canned(
            json!(124.043_475_275_160_74),
            "Audio buffer signature: 124.0434753",
        ),
    );

    probes
}

/// The WebGL pair arrives pre-summed: the vendor and renderer strings are
/// correlated sub-signals of one observation, so the probe combines their
/// baseline bits itself rather than letting them double-count elsewhere.
fn webgl_probe() -> CannedProbe {
    let vendor = reference::baseline("webgl_vendor").map_or(0.0, |b| b.bits);
    let renderer = reference::baseline("webgl_renderer").map_or(0.0, |b| b.bits);
    let entropy = vendor + renderer;
    CannedProbe {
        reading: ProbeReading {
            value: json!({
                "vendor": "Google Inc. (Intel)",
                "renderer": "ANGLE (Intel, Intel(R) Iris(R) Xe Graphics Direct3D11)",
            }),
            message: "WebGL: Intel Iris Xe via ANGLE".to_string(),
            lookup: Some(LookupOverride {
                percent: None,
                source: None,
                source_label: "WebGL probe (vendor + renderer pre-summed)".to_string(),
                estimated: true,
                entropy,
                one_in_x: anonymity_set_size(entropy),
                note: Some("Vendor and renderer bits summed by the probe.".to_string()),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use traceprint_core::{EngineConfig, NullSink, TestOrchestrator};

    #[tokio::test]
    async fn test_demo_set_covers_every_attribute() {
        let config = EngineConfig::builtin();
        let probes = build();
        let orchestrator = TestOrchestrator::new(&config);
        let report = orchestrator.run(&probes, &mut NullSink).await;

        assert_eq!(report.successful_count, config.attributes.len());
        assert!(report.failed_attribute_names.is_empty());
        assert!(report.final_entropy_bits > 30.0);
    }

    #[tokio::test]
    async fn test_demo_run_is_deterministic() {
        let config = EngineConfig::builtin();
        let orchestrator = TestOrchestrator::new(&config);
        let first = orchestrator.run(&build(), &mut NullSink).await;
        let second = orchestrator.run(&build(), &mut NullSink).await;
        assert_eq!(first.fingerprint_hash, second.fingerprint_hash);
        assert_eq!(first.final_entropy_bits, second.final_entropy_bits);
    }
}
