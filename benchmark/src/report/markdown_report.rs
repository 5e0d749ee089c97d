//! @ai:module:intent Markdown report generation
//! @ai:module:layer infrastructure
//! @ai:module:public_api MarkdownReporter
//! @ai:module:stateless true

use crate::metrics::{BenchmarkResults, DeltaStats};
use anyhow::Result;
use std::fmt::Write as FmtWrite;
use std::path::Path;

/// @ai:intent Trait for Markdown report generation
pub trait MarkdownReporterTrait: Send + Sync {
    /// @ai:intent Generate Markdown report from results
    fn generate(&self, results: &BenchmarkResults, output_path: &Path) -> Result<()>;
}

/// @ai:intent Generates Markdown reports from benchmark results
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// @ai:intent Create a new Markdown reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Format a signed difference with a unit suffix
    /// @ai:effects pure
    fn format_delta(value: f64, unit: &str) -> String {
        if value >= 0.0 {
            format!("+{:.2}{}", value, unit)
        } else {
            format!("{:.2}{}", value, unit)
        }
    }

    /// @ai:intent Generate run summary section
    /// @ai:effects pure
    fn generate_summary(results: &BenchmarkResults) -> String {
        let mut output = String::new();

        writeln!(output, "# Annotation Import Benchmark").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "**Date:** {}", results.timestamp).unwrap();
        writeln!(
            output,
            "**Interpreter:** {} ({})",
            results.interpreter, results.interpreter_version
        )
        .unwrap();
        writeln!(
            output,
            "**Layout:** {} packages x {} modules, {} function pairs per module",
            results.layout.packages,
            results.layout.modules_per_package,
            results.layout.functions_per_module
        )
        .unwrap();
        writeln!(output, "**Trials:** {}", results.trials).unwrap();
        writeln!(output).unwrap();

        output
    }

    /// @ai:intent Generate per-variant results table
    /// @ai:effects pure
    fn generate_variant_table(results: &BenchmarkResults) -> String {
        let mut output = String::new();

        writeln!(output, "## Results").unwrap();
        writeln!(output).unwrap();
        writeln!(
            output,
            "| Variant | Import Time (geo mean) | Stdev | Samples | RSS Memory |"
        )
        .unwrap();
        writeln!(output, "|---------|------------------------|-------|---------|------------|").unwrap();

        for variant in &results.variants {
            writeln!(
                output,
                "| {} | {:.3}s | {:.3}s | {} | {} |",
                variant.variant,
                variant.timing.geometric_mean_secs,
                variant.timing.stdev_secs,
                variant.timing.samples,
                variant.memory.raw
            )
            .unwrap();
        }

        writeln!(output).unwrap();
        output
    }

    /// @ai:intent Generate delta section
    /// @ai:effects pure
    fn generate_delta_section(delta: &DeltaStats) -> String {
        let mut output = String::new();

        writeln!(output, "## With vs Without `from __future__ import annotations`").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "| Metric | Delta |").unwrap();
        writeln!(output, "|--------|-------|").unwrap();
        writeln!(
            output,
            "| Import time | {} |",
            Self::format_delta(delta.import_time_secs, "s")
        )
        .unwrap();
        writeln!(
            output,
            "| Import time ratio | {:.2}x |",
            delta.import_time_ratio
        )
        .unwrap();

        match delta.memory_mb {
            Some(memory) => writeln!(
                output,
                "| RSS memory | {} |",
                Self::format_delta(memory, " MB")
            )
            .unwrap(),
            None => writeln!(output, "| RSS memory | n/a |").unwrap(),
        }

        writeln!(output).unwrap();
        output
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownReporterTrait for MarkdownReporter {
    /// @ai:intent Generate Markdown report to file
    /// @ai:effects fs:write
    fn generate(&self, results: &BenchmarkResults, output_path: &Path) -> Result<()> {
        let mut content = String::new();

        content.push_str(&Self::generate_summary(results));
        content.push_str(&Self::generate_variant_table(results));

        if let Some(delta) = &results.delta {
            content.push_str(&Self::generate_delta_section(delta));
        }

        std::fs::write(output_path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::sample_results;
    use tempfile::TempDir;

    #[test]
    fn test_format_delta_positive() {
        assert_eq!(MarkdownReporter::format_delta(12.5, "s"), "+12.50s");
    }

    #[test]
    fn test_format_delta_negative() {
        assert_eq!(MarkdownReporter::format_delta(-5.3, " MB"), "-5.30 MB");
    }

    #[test]
    fn test_generate_markdown_report() {
        let reporter = MarkdownReporter::new();
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("results.md");

        reporter.generate(&sample_results(), &output).unwrap();
        assert!(output.exists());

        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.contains("# Annotation Import Benchmark"));
        assert!(content.contains("| example_no_future | 2.000s | 0.100s | 20 | 120.00 MB |"));
        assert!(content.contains("| Import time | -1.00s |"));
        assert!(content.contains("| RSS memory | -20.00 MB |"));
    }

    #[test]
    fn test_report_without_delta() {
        let reporter = MarkdownReporter::new();
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("results.md");

        let mut results = sample_results();
        results.delta = None;
        results.variants.truncate(1);

        reporter.generate(&results, &output).unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        assert!(!content.contains("ratio"));
    }
}
