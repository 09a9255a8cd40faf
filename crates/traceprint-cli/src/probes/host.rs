//! Probes that read what this host will actually reveal.
//!
//! A terminal host exposes far less than a browser: no screen geometry, no
//! canvas, no audio stack. The probes here cover the OS-observable subset;
//! everything else stays unregistered and lands in the unavailable list,
//! which is exactly the partial-completion behavior the engine promises.

use async_trait::async_trait;
use serde_json::json;
use traceprint_core::probe::{AttributeProbe, ProbeError, ProbeReading};
use traceprint_core::ProbeSet;

/// Probe set for the current host.
pub fn build() -> ProbeSet {
    let mut probes = ProbeSet::new();
    probes.register("operating_system", Box::new(OperatingSystemProbe));
    probes.register("language", Box::new(LanguageProbe));
    probes.register("timezone", Box::new(TimezoneProbe));
    probes.register("cpu_cores", Box::new(CpuCoresProbe));
    probes.register("device_memory", Box::new(DeviceMemoryProbe));
    probes
}

struct OperatingSystemProbe;

#[async_trait]
impl AttributeProbe for OperatingSystemProbe {
    async fn detect(&self) -> Result<Option<ProbeReading>, ProbeError> {
        let name = match std::env::consts::OS {
            "linux" => "Linux",
            "macos" => "macOS",
            "windows" => "Windows",
            other => other,
        };
        Ok(Some(ProbeReading::new(
            json!(name),
            format!("Operating system: {name}"),
        )))
    }
}

struct LanguageProbe;

#[async_trait]
impl AttributeProbe for LanguageProbe {
    async fn detect(&self) -> Result<Option<ProbeReading>, ProbeError> {
        let raw = std::env::var("LC_ALL")
            .or_else(|_| std::env::var("LANG"))
            .unwrap_or_default();
        // "en_US.UTF-8" -> "en-US"; "C"/"POSIX" carry no locale signal.
        let tag = raw.split('.').next().unwrap_or("").replace('_', "-");
        if tag.is_empty() || tag == "C" || tag == "POSIX" {
            return Ok(None);
        }
        Ok(Some(ProbeReading::new(
            json!(tag),
            format!("Preferred language: {tag}"),
        )))
    }
}

struct TimezoneProbe;

#[async_trait]
impl AttributeProbe for TimezoneProbe {
    async fn detect(&self) -> Result<Option<ProbeReading>, ProbeError> {
        let Some(offset_minutes) = utc_offset_minutes() else {
            return Ok(None);
        };
        let label = format_utc_offset(offset_minutes);
        Ok(Some(ProbeReading::new(
            json!(label),
            format!("Timezone: {label}"),
        )))
    }
}

#[cfg(unix)]
fn utc_offset_minutes() -> Option<i64> {
    let mut tm: libc::tm = unsafe { std::mem::zeroed() };
    let now = unsafe { libc::time(std::ptr::null_mut()) };
    // SAFETY: localtime_r writes the broken-down time into our tm and
    // returns null only on failure; tm is valid for writes.
    let result = unsafe { libc::localtime_r(&now, &mut tm) };
    if result.is_null() {
        return None;
    }
    Some(i64::from(tm.tm_gmtoff as i32) / 60)
}

#[cfg(not(unix))]
fn utc_offset_minutes() -> Option<i64> {
    None
}

/// "UTC+1", "UTC-8", "UTC+5:30" — matching the reference-table keys.
fn format_utc_offset(minutes: i64) -> String {
    let sign = if minutes < 0 { '-' } else { '+' };
    let abs = minutes.abs();
    let (hours, rest) = (abs / 60, abs % 60);
    if rest == 0 {
        format!("UTC{sign}{hours}")
    } else {
        format!("UTC{sign}{hours}:{rest:02}")
    }
}

struct CpuCoresProbe;

#[async_trait]
impl AttributeProbe for CpuCoresProbe {
    async fn detect(&self) -> Result<Option<ProbeReading>, ProbeError> {
        let cores = std::thread::available_parallelism()
            .map_err(|e| ProbeError::Backend(e.to_string()))?
            .get();
        Ok(Some(ProbeReading::new(
            json!(cores),
            format!("Logical CPU cores: {cores}"),
        )))
    }
}

struct DeviceMemoryProbe;

#[async_trait]
impl AttributeProbe for DeviceMemoryProbe {
    async fn detect(&self) -> Result<Option<ProbeReading>, ProbeError> {
        let Some(gb) = total_memory_gb() else {
            return Ok(None);
        };
        Ok(Some(ProbeReading::new(
            json!(gb),
            format!("System memory: {gb} GB"),
        )))
    }
}

#[cfg(target_os = "linux")]
fn total_memory_gb() -> Option<u64> {
    let meminfo = std::fs::read_to_string("/proc/meminfo").ok()?;
    let kb: u64 = meminfo
        .lines()
        .find(|line| line.starts_with("MemTotal:"))?
        .split_whitespace()
        .nth(1)?
        .parse()
        .ok()?;
    // Round to the nearest GB; sizes report slightly under the nameplate.
    Some((kb as f64 / 1024.0 / 1024.0).round() as u64)
}

#[cfg(not(target_os = "linux"))]
fn total_memory_gb() -> Option<u64> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_utc_offset() {
        assert_eq!(format_utc_offset(0), "UTC+0");
        assert_eq!(format_utc_offset(60), "UTC+1");
        assert_eq!(format_utc_offset(-480), "UTC-8");
        assert_eq!(format_utc_offset(330), "UTC+5:30");
        assert_eq!(format_utc_offset(-150), "UTC-2:30");
    }

    #[tokio::test]
    async fn test_cpu_cores_probe_reports_a_count() {
        let reading = CpuCoresProbe.detect().await.unwrap().unwrap();
        assert!(reading.value.as_u64().unwrap() >= 1);
    }

    #[tokio::test]
    async fn test_operating_system_probe_always_succeeds() {
        let reading = OperatingSystemProbe.detect().await.unwrap().unwrap();
        assert!(reading.value.is_string());
    }
}
