//! @ai:module:intent Import-time and memory benchmark for deferred annotation evaluation
//! @ai:module:layer application
//! @ai:module:public_api config, generator, runner, metrics, report, checker, toolchain, error

pub mod checker;
pub mod config;
pub mod error;
pub mod generator;
pub mod metrics;
pub mod report;
pub mod runner;
pub mod toolchain;

pub use checker::{verify_tree, CheckResult, SyntaxChecker, SyntaxCheckerTrait};
pub use config::BenchConfig;
pub use error::{BenchError, Result};
pub use generator::{GeneratedTree, SourceTreeGenerator, Variant};
pub use metrics::{BenchmarkResults, MetricsAggregator, VariantResult};
pub use report::{ConsoleReporter, ReportGenerator};
pub use runner::{create_executor, BenchmarkExecutor, ModuleLauncherTrait, PythonLauncher};
pub use toolchain::{ToolchainStatus, ToolchainValidator};
