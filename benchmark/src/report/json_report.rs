//! @ai:module:intent JSON persistence of benchmark results
//! @ai:module:layer infrastructure
//! @ai:module:public_api JsonReporter
//! @ai:module:stateless true

use crate::metrics::BenchmarkResults;
use anyhow::{Context, Result};
use std::path::Path;

/// @ai:intent Trait for JSON report generation
pub trait JsonReporterTrait: Send + Sync {
    /// @ai:intent Write results as pretty JSON
    fn generate(&self, results: &BenchmarkResults, output_path: &Path) -> Result<()>;

    /// @ai:intent Read results written by generate
    fn load(&self, input_path: &Path) -> Result<BenchmarkResults>;
}

/// @ai:intent Writes and reads results.json
pub struct JsonReporter;

impl JsonReporter {
    /// @ai:intent Create a new JSON reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReporterTrait for JsonReporter {
    /// @ai:effects fs:write
    fn generate(&self, results: &BenchmarkResults, output_path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(output_path, json)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        Ok(())
    }

    /// @ai:pre input_path holds JSON produced by generate
    /// @ai:effects fs:read
    fn load(&self, input_path: &Path) -> Result<BenchmarkResults> {
        let content = std::fs::read_to_string(input_path)
            .with_context(|| format!("Failed to read {}", input_path.display()))?;

        let results: BenchmarkResults = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse results from {}", input_path.display()))?;

        tracing::debug!(
            "Loaded {} variant results from {}",
            results.variants.len(),
            input_path.display()
        );
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Variant;
    use crate::report::sample_results;
    use tempfile::TempDir;

    #[test]
    fn test_generated_json_loads_back() {
        let reporter = JsonReporter::new();
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("results.json");

        reporter.generate(&sample_results(), &output).unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.contains("\"with_future\""));
        assert!(content.contains("Python 3.12.1"));

        let loaded = reporter.load(&output).unwrap();
        assert_eq!(loaded.variants.len(), 2);
        assert_eq!(
            loaded.variant(Variant::WithFuture).unwrap().memory.megabytes,
            Some(100.0)
        );
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("results.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonReporter::new().load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
