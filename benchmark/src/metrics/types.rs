//! @ai:module:intent Measurement and result types for benchmark runs
//! @ai:module:layer domain
//! @ai:module:public_api TimingSummary, MemoryReading, VariantResult, DeltaStats, BenchmarkResults
//! @ai:module:stateless true

use crate::config::LayoutConfig;
use crate::generator::Variant;
use serde::{Deserialize, Serialize};

/// @ai:intent Aggregate statistics over the timing trials of one variant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimingSummary {
    pub geometric_mean_secs: f64,
    pub stdev_secs: f64,
    pub samples: usize,
    pub warmup_excluded: usize,
}

/// @ai:intent Resident memory reported by the memory probe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryReading {
    /// Probe stdout, trimmed, printed verbatim.
    pub raw: String,
    pub megabytes: Option<f64>,
}

impl MemoryReading {
    /// @ai:intent Parse probe output of the form "<float> MB"
    /// @ai:example ("123.45 MB\n") -> raw "123.45 MB", megabytes Some(123.45)
    /// @ai:example ("garbage") -> megabytes None
    /// @ai:effects pure
    pub fn parse(output: &str) -> Self {
        let raw = output.trim().to_string();

        let megabytes = regex::Regex::new(r"^([0-9]+(?:\.[0-9]+)?)\s*MB$")
            .ok()
            .and_then(|re| re.captures(&raw))
            .and_then(|cap| cap.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok());

        Self { raw, megabytes }
    }
}

/// @ai:intent Everything measured for a single variant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantResult {
    pub variant: Variant,
    pub trials_secs: Vec<f64>,
    pub timing: TimingSummary,
    pub memory: MemoryReading,
}

/// @ai:intent Difference of the deferred variant relative to the immediate one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeltaStats {
    pub import_time_secs: f64,
    pub import_time_ratio: f64,
    pub memory_mb: Option<f64>,
}

impl DeltaStats {
    /// @ai:intent Calculate delta of with_future against no_future
    /// @ai:effects pure
    pub fn calculate(no_future: &VariantResult, with_future: &VariantResult) -> Self {
        let baseline = no_future.timing.geometric_mean_secs;
        let deferred = with_future.timing.geometric_mean_secs;

        let import_time_ratio = if baseline > 0.0 {
            deferred / baseline
        } else {
            0.0
        };

        let memory_mb = match (no_future.memory.megabytes, with_future.memory.megabytes) {
            (Some(before), Some(after)) => Some(after - before),
            _ => None,
        };

        Self {
            import_time_secs: deferred - baseline,
            import_time_ratio,
            memory_mb,
        }
    }
}

/// @ai:intent Complete benchmark results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResults {
    pub timestamp: String,
    pub interpreter: String,
    pub interpreter_version: String,
    pub layout: LayoutConfig,
    pub trials: usize,
    pub variants: Vec<VariantResult>,
    /// Present when both variants were measured.
    #[serde(default)]
    pub delta: Option<DeltaStats>,
}

impl BenchmarkResults {
    /// @ai:intent Find the result of a variant
    /// @ai:effects pure
    pub fn variant(&self, variant: Variant) -> Option<&VariantResult> {
        self.variants.iter().find(|v| v.variant == variant)
    }
}
