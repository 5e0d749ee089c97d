//! @ai:module:intent Console and file reports for benchmark results
//! @ai:module:layer infrastructure
//! @ai:module:public_api ConsoleReporter, ReportGenerator, JsonReporter, MarkdownReporter, ChartGenerator

pub mod charts;
pub mod console;
pub mod json_report;
pub mod markdown_report;

pub use charts::{ChartGenerator, ChartGeneratorTrait};
pub use console::ConsoleReporter;
pub use json_report::{JsonReporter, JsonReporterTrait};
pub use markdown_report::{MarkdownReporter, MarkdownReporterTrait};

use crate::metrics::BenchmarkResults;
use anyhow::Result;
use std::path::Path;

/// @ai:intent Combined file report generator
pub struct ReportGenerator {
    json: JsonReporter,
    markdown: MarkdownReporter,
    charts: ChartGenerator,
}

impl ReportGenerator {
    /// @ai:intent Create a new report generator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            json: JsonReporter::new(),
            markdown: MarkdownReporter::new(),
            charts: ChartGenerator::new(),
        }
    }

    /// @ai:intent Generate all reports
    /// @ai:effects fs:write
    pub fn generate_all(&self, results: &BenchmarkResults, output_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(output_dir)?;

        self.json.generate(results, &output_dir.join("results.json"))?;
        self.markdown
            .generate(results, &output_dir.join("results.md"))?;
        self.charts.generate_all(results, output_dir)?;

        tracing::info!("Reports generated in {}", output_dir.display());
        Ok(())
    }

    /// @ai:intent Rebuild all reports from a saved results.json
    /// @ai:effects fs:read, fs:write
    pub fn regenerate(&self, results_path: &Path, output_dir: &Path) -> Result<BenchmarkResults> {
        let results = self.json.load(results_path)?;
        self.generate_all(&results, output_dir)?;
        Ok(results)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
pub(crate) fn sample_results() -> BenchmarkResults {
    use crate::config::LayoutConfig;
    use crate::generator::Variant;
    use crate::metrics::{DeltaStats, MemoryReading, TimingSummary, VariantResult};

    let make = |variant: Variant, mean: f64, memory: &str| VariantResult {
        variant,
        trials_secs: vec![mean * 1.5, mean, mean * 1.05, mean * 0.95],
        timing: TimingSummary {
            geometric_mean_secs: mean,
            stdev_secs: 0.1,
            samples: 20,
            warmup_excluded: 1,
        },
        memory: MemoryReading::parse(memory),
    };

    let no_future = make(Variant::NoFuture, 2.0, "120.00 MB");
    let with_future = make(Variant::WithFuture, 1.0, "100.00 MB");
    let delta = DeltaStats::calculate(&no_future, &with_future);

    BenchmarkResults {
        timestamp: "2026-01-19T00:00:00Z".to_string(),
        interpreter: "python3".to_string(),
        interpreter_version: "Python 3.12.1".to_string(),
        layout: LayoutConfig::default(),
        trials: 21,
        variants: vec![no_future, with_future],
        delta: Some(delta),
    }
}
