//! @ai:module:intent Statistical aggregation for trial timings
//! @ai:module:layer application
//! @ai:module:public_api MetricsAggregator, geometric_mean, sample_stdev, arithmetic_mean
//! @ai:module:stateless true

use crate::config::BenchConfig;
use crate::error::{BenchError, Result};
use crate::generator::Variant;
use crate::metrics::types::{
    BenchmarkResults, DeltaStats, MemoryReading, TimingSummary, VariantResult,
};

/// Samples needed for a sample standard deviation.
const MIN_SAMPLES: usize = 2;

/// @ai:intent Calculate average of an iterator of f64
/// @ai:effects pure
pub fn arithmetic_mean<I: Iterator<Item = f64>>(iter: I) -> f64 {
    let (sum, count) = iter.fold((0.0, 0u32), |(s, c), v| (s + v, c + 1));

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// @ai:intent Geometric mean of strictly positive samples
/// @ai:pre samples non-empty, every sample finite and > 0
/// @ai:post 0 < result <= arithmetic_mean(samples)
/// @ai:effects pure
pub fn geometric_mean(samples: &[f64]) -> Result<f64> {
    if samples.is_empty() {
        return Err(BenchError::InsufficientSamples {
            required: 1,
            actual: 0,
        });
    }

    for (index, &value) in samples.iter().enumerate() {
        if !value.is_finite() || value <= 0.0 {
            return Err(BenchError::InvalidSample { index, value });
        }
    }

    Ok(arithmetic_mean(samples.iter().map(|v| v.ln())).exp())
}

/// @ai:intent Sample (n - 1) standard deviation
/// @ai:pre at least two finite samples
/// @ai:effects pure
pub fn sample_stdev(samples: &[f64]) -> Result<f64> {
    if samples.len() < MIN_SAMPLES {
        return Err(BenchError::InsufficientSamples {
            required: MIN_SAMPLES,
            actual: samples.len(),
        });
    }

    if let Some((index, &value)) = samples.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(BenchError::InvalidSample { index, value });
    }

    let mean = arithmetic_mean(samples.iter().copied());
    let squares: f64 = samples.iter().map(|v| (v - mean).powi(2)).sum();

    Ok((squares / (samples.len() - 1) as f64).sqrt())
}

/// @ai:intent Turns raw trial timings into per-variant and overall results
pub struct MetricsAggregator {
    warmup: usize,
}

impl MetricsAggregator {
    /// @ai:intent Create an aggregator that drops the first `warmup` trials
    /// @ai:post the first trial is always dropped, even for warmup 0
    /// @ai:effects pure
    pub fn new(warmup: usize) -> Self {
        Self {
            warmup: warmup.max(1),
        }
    }

    /// @ai:intent Summarize trials, excluding the warm-up prefix
    /// @ai:example ([2.0, 1.0, 1.0, 1.0], warmup=1) -> mean 1.0, stdev 0.0, samples 3
    /// @ai:effects pure
    pub fn summarize(&self, trials: &[f64]) -> Result<TimingSummary> {
        let measured = trials.get(self.warmup..).unwrap_or_default();

        if measured.len() < MIN_SAMPLES {
            return Err(BenchError::InsufficientSamples {
                required: MIN_SAMPLES,
                actual: measured.len(),
            });
        }

        Ok(TimingSummary {
            geometric_mean_secs: geometric_mean(measured)?,
            stdev_secs: sample_stdev(measured)?,
            samples: measured.len(),
            warmup_excluded: self.warmup,
        })
    }

    /// @ai:intent Build the result record of one variant
    /// @ai:effects pure
    pub fn variant_result(
        &self,
        variant: Variant,
        trials: Vec<f64>,
        timing: TimingSummary,
        memory: MemoryReading,
    ) -> VariantResult {
        VariantResult {
            variant,
            trials_secs: trials,
            timing,
            memory,
        }
    }

    /// @ai:intent Combine variant results into benchmark results
    /// @ai:effects pure
    pub fn aggregate(
        &self,
        variants: Vec<VariantResult>,
        config: &BenchConfig,
        interpreter_version: &str,
    ) -> BenchmarkResults {
        let no_future = variants.iter().find(|v| v.variant == Variant::NoFuture);
        let with_future = variants.iter().find(|v| v.variant == Variant::WithFuture);

        let delta = match (no_future, with_future) {
            (Some(before), Some(after)) => Some(DeltaStats::calculate(before, after)),
            _ => None,
        };

        BenchmarkResults {
            timestamp: chrono::Utc::now().to_rfc3339(),
            interpreter: config.interpreter.clone(),
            interpreter_version: interpreter_version.to_string(),
            layout: config.layout.clone(),
            trials: config.run.trials,
            variants,
            delta,
        }
    }
}

impl Default for MetricsAggregator {
    fn default() -> Self {
        Self::new(1)
    }
}
