//! @ai:module:intent Trial execution and orchestration of a benchmark run
//! @ai:module:layer application
//! @ai:module:public_api BenchmarkExecutor, create_executor, TEMPDIR_SUFFIX
//! @ai:module:stateless false

use crate::config::BenchConfig;
use crate::error::{BenchError, Result};
use crate::generator::{GeneratedTree, SourceTreeGenerator, Variant};
use crate::metrics::{BenchmarkResults, MemoryReading, MetricsAggregator, VariantResult};
use crate::report::ConsoleReporter;
use crate::runner::launcher::ModuleLauncherTrait;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tempfile::TempDir;

/// Suffix of the per-run working directory.
pub const TEMPDIR_SUFFIX: &str = "_benchmark_annotations";

/// @ai:intent Runs generation, timing trials and memory probes for both variants
pub struct BenchmarkExecutor<L: ModuleLauncherTrait> {
    launcher: Arc<L>,
    generator: SourceTreeGenerator,
    aggregator: MetricsAggregator,
    config: BenchConfig,
}

impl<L: ModuleLauncherTrait> BenchmarkExecutor<L> {
    /// @ai:intent Create a new benchmark executor
    /// @ai:effects pure
    pub fn new(launcher: Arc<L>, config: BenchConfig) -> Self {
        Self {
            launcher,
            generator: SourceTreeGenerator::new(config.layout.clone()),
            aggregator: MetricsAggregator::new(config.run.warmup),
            config,
        }
    }

    /// @ai:intent Generate the variant's source tree inside workdir
    /// @ai:effects fs:write
    pub fn prepare(&self, workdir: &Path, variant: Variant) -> Result<GeneratedTree> {
        self.generator.generate(workdir, variant)
    }

    /// @ai:intent Time one fresh-interpreter import of the aggregator per trial
    /// @ai:pre tree was generated by prepare
    /// @ai:post returns exactly config.run.trials samples in run order
    /// @ai:effects io
    pub fn time_trials<F>(&self, tree: &GeneratedTree, mut on_trial: F) -> Result<Vec<f64>>
    where
        F: FnMut(usize) -> std::io::Result<()>,
    {
        let module = tree.aggregator_module();
        let mut times = Vec::with_capacity(self.config.run.trials);

        for trial in 0..self.config.run.trials {
            on_trial(trial)?;

            let start = Instant::now();
            self.launcher.run_module(&tree.workdir, &module)?;
            let elapsed = start.elapsed().as_secs_f64();

            tracing::debug!("{} trial {}: {:.4}s", tree.variant, trial, elapsed);
            times.push(elapsed);
        }

        Ok(times)
    }

    /// @ai:intent Import the tree once more and read the probe's memory report
    /// @ai:effects io
    pub fn probe_memory(&self, tree: &GeneratedTree) -> Result<MemoryReading> {
        let output = self
            .launcher
            .run_module(&tree.workdir, &tree.memory_probe_module())?;
        let reading = MemoryReading::parse(&output.stdout);

        if reading.megabytes.is_none() {
            tracing::warn!(
                "Memory probe for {} printed unexpected output: {:?}",
                tree.variant,
                reading.raw
            );
        }

        Ok(reading)
    }

    /// @ai:intent Run one variant end to end, printing its console block
    /// @ai:effects fs:write, io
    pub fn execute_variant<W: Write>(
        &self,
        workdir: &Path,
        variant: Variant,
        out: &mut W,
    ) -> Result<VariantResult> {
        ConsoleReporter::write_banner(out, variant)?;

        let tree = self.prepare(workdir, variant)?;
        let trials = self.time_trials(&tree, |_| ConsoleReporter::write_progress(out))?;

        let timing = self.aggregator.summarize(&trials)?;
        ConsoleReporter::write_timing(out, &timing)?;

        let memory = self.probe_memory(&tree)?;
        ConsoleReporter::write_memory(out, &memory)?;

        Ok(self
            .aggregator
            .variant_result(variant, trials, timing, memory))
    }

    /// @ai:intent Run both variants in a fresh system temporary directory
    /// @ai:post the temporary directory no longer exists, on success or error
    /// @ai:effects fs:write, io
    pub fn execute_all<W: Write>(
        &self,
        out: &mut W,
        interpreter_version: &str,
    ) -> Result<BenchmarkResults> {
        let tempdir = tempfile::Builder::new()
            .suffix(TEMPDIR_SUFFIX)
            .tempdir()
            .map_err(BenchError::io(std::env::temp_dir()))?;

        self.execute_in(tempdir, out, interpreter_version)
    }

    /// @ai:intent Run both variants in a temporary directory created under parent
    /// @ai:post the temporary directory no longer exists, on success or error
    /// @ai:effects fs:write, io
    pub fn execute_all_in<W: Write>(
        &self,
        parent: &Path,
        out: &mut W,
        interpreter_version: &str,
    ) -> Result<BenchmarkResults> {
        let tempdir = tempfile::Builder::new()
            .suffix(TEMPDIR_SUFFIX)
            .tempdir_in(parent)
            .map_err(BenchError::io(parent))?;

        self.execute_in(tempdir, out, interpreter_version)
    }

    /// Dropping `tempdir` on any early return removes it.
    fn execute_in<W: Write>(
        &self,
        tempdir: TempDir,
        out: &mut W,
        interpreter_version: &str,
    ) -> Result<BenchmarkResults> {
        tracing::info!("Working directory: {}", tempdir.path().display());

        let mut variants = Vec::with_capacity(Variant::ALL.len());

        for variant in Variant::ALL {
            tracing::info!("Benchmarking {}", variant);
            variants.push(self.execute_variant(tempdir.path(), variant, out)?);
        }

        let path = tempdir.path().to_path_buf();
        tempdir.close().map_err(BenchError::io(path))?;

        Ok(self
            .aggregator
            .aggregate(variants, &self.config, interpreter_version))
    }
}

/// @ai:intent Create executor from config after validating it
/// @ai:effects pure
pub fn create_executor<L: ModuleLauncherTrait>(
    launcher: Arc<L>,
    config: &BenchConfig,
) -> Result<BenchmarkExecutor<L>> {
    config.validate()?;
    Ok(BenchmarkExecutor::new(launcher, config.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LayoutConfig, RunConfig};
    use crate::runner::launcher::{program_available, PythonLauncher, ScriptedLauncher};
    use pretty_assertions::assert_eq;

    fn small_config(trials: usize) -> BenchConfig {
        BenchConfig {
            interpreter: "python3".to_string(),
            layout: LayoutConfig {
                packages: 2,
                modules_per_package: 3,
                functions_per_module: 2,
            },
            run: RunConfig { trials, warmup: 1 },
        }
    }

    fn entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn test_runs_both_variants_and_cleans_up() {
        let parent = TempDir::new().unwrap();
        let launcher = Arc::new(ScriptedLauncher::new("25.00 MB\n"));
        let executor = create_executor(launcher.clone(), &small_config(4)).unwrap();

        let mut out = Vec::new();
        let results = executor
            .execute_all_in(parent.path(), &mut out, "Python 3.12.1")
            .unwrap();

        // four trials plus one memory probe per variant
        assert_eq!(launcher.calls(), 10);
        assert_eq!(entries(parent.path()), 0);

        assert_eq!(results.variants.len(), 2);
        assert_eq!(results.variants[0].variant, Variant::NoFuture);
        assert_eq!(results.variants[1].variant, Variant::WithFuture);
        assert_eq!(results.variants[0].trials_secs.len(), 4);
        assert_eq!(results.variants[0].timing.samples, 3);
        assert_eq!(results.variants[1].memory.megabytes, Some(25.0));
        assert!(results.delta.is_some());

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert!(lines[0].contains(" example_no_future "));
        assert_eq!(lines[1], "....");
        assert!(lines[2].starts_with("Import time: "));
        assert_eq!(lines[3], "RSS Memory usage: 25.00 MB");
        assert!(lines[4].contains(" example_with_future "));
    }

    #[test]
    fn test_trial_failure_aborts_and_cleans_up() {
        let parent = TempDir::new().unwrap();
        let launcher = Arc::new(ScriptedLauncher::new("1.00 MB").failing_on(3));
        let executor = create_executor(launcher.clone(), &small_config(4)).unwrap();

        let mut out = Vec::new();
        let err = executor
            .execute_all_in(parent.path(), &mut out, "Python 3.12.1")
            .unwrap_err();

        assert!(matches!(err, BenchError::ModuleFailed { .. }));
        assert_eq!(launcher.calls(), 3);
        assert_eq!(entries(parent.path()), 0);

        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("Import time"));
        assert!(!text.contains("example_with_future"));
    }

    #[test]
    fn test_memory_probe_failure_aborts_second_variant() {
        let parent = TempDir::new().unwrap();
        // calls 1-3 are trials of the first variant, call 4 is its probe
        let launcher = Arc::new(ScriptedLauncher::new("1.00 MB").failing_on(4));
        let executor = create_executor(launcher.clone(), &small_config(3)).unwrap();

        let mut out = Vec::new();
        assert!(executor
            .execute_all_in(parent.path(), &mut out, "")
            .is_err());
        assert_eq!(entries(parent.path()), 0);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Import time"));
        assert!(!text.contains("RSS Memory usage"));
    }

    #[test]
    fn test_time_trials_returns_positive_samples() {
        let workdir = TempDir::new().unwrap();
        let executor = BenchmarkExecutor::new(
            Arc::new(ScriptedLauncher::new("")),
            small_config(5),
        );

        let tree = executor.prepare(workdir.path(), Variant::WithFuture).unwrap();
        let mut seen = Vec::new();
        let times = executor
            .time_trials(&tree, |trial| {
                seen.push(trial);
                Ok(())
            })
            .unwrap();

        assert_eq!(times.len(), 5);
        assert!(times.iter().all(|t| *t > 0.0));
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_create_executor_rejects_invalid_config() {
        let launcher = Arc::new(ScriptedLauncher::new(""));
        assert!(create_executor(launcher, &small_config(2)).is_err());
    }

    #[test]
    fn test_end_to_end_with_python() {
        if !program_available("python3") {
            return;
        }

        let parent = TempDir::new().unwrap();
        let launcher = Arc::new(PythonLauncher::new("python3"));
        let executor = create_executor(launcher, &small_config(3)).unwrap();

        let mut out = Vec::new();
        let results = executor
            .execute_all_in(parent.path(), &mut out, "python3")
            .unwrap();

        assert_eq!(entries(parent.path()), 0);

        for variant in &results.variants {
            assert!(variant.timing.geometric_mean_secs > 0.0);
            let megabytes = variant.memory.megabytes.expect("probe prints '<float> MB'");
            assert!(megabytes >= 0.0);
        }
    }
}
