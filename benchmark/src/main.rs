//! @ai:module:intent CLI for the annotation import benchmark
//! @ai:module:layer presentation

use annotations_bench::{
    checker::{verify_tree, SyntaxChecker},
    config::BenchConfig,
    generator::{SourceTreeGenerator, Variant},
    report::{ConsoleReporter, ReportGenerator},
    runner::{create_executor, PythonLauncher, TEMPDIR_SUFFIX},
    toolchain::ToolchainValidator,
};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "annotations-bench")]
#[command(about = "Measure import time and memory of Python modules with and without deferred annotations")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the benchmark (default when no command is given)
    Run(RunArgs),

    /// Generate both trees, byte-compile every module and import each tree once
    Verify {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Interpreter to benchmark
        #[arg(short, long)]
        interpreter: Option<String>,
    },

    /// Generate reports from a saved results.json
    Report {
        /// Path to results JSON file
        #[arg(short, long)]
        results: PathBuf,

        /// Output directory for reports
        #[arg(short, long, default_value = "reports")]
        output: PathBuf,
    },

    /// Initialize default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = "annotations-bench.toml")]
        output: PathBuf,
    },
}

#[derive(Args, Default)]
struct RunArgs {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interpreter to benchmark
    #[arg(short, long)]
    interpreter: Option<String>,

    /// Timing trials per variant, the first is a discarded warm-up
    #[arg(short, long)]
    trials: Option<usize>,

    /// Directory for JSON, Markdown and chart reports
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("annotations_bench=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        None => run_benchmark(RunArgs::default()),
        Some(Commands::Run(args)) => run_benchmark(args),
        Some(Commands::Verify {
            config,
            interpreter,
        }) => verify(config, interpreter),
        Some(Commands::Report { results, output }) => generate_reports(results, output),
        Some(Commands::Init { output }) => init_config(output),
    }
}

/// @ai:intent Run both variants and print their summaries
/// @ai:effects fs:write, io
fn run_benchmark(args: RunArgs) -> Result<()> {
    let mut config = load_or_default_config(args.config, args.interpreter)?;

    if let Some(trials) = args.trials {
        config.run.trials = trials;
    }

    let toolchain = ToolchainValidator::validate(&config.interpreter)?;
    let launcher = Arc::new(PythonLauncher::new(toolchain.program.clone()));
    let executor = create_executor(launcher, &config)?;

    let results = {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        executor.execute_all(&mut out, &toolchain.version)?
    };

    if let Some(output_dir) = args.output {
        ReportGenerator::new()
            .generate_all(&results, &output_dir)
            .with_context(|| format!("Failed to write reports to {}", output_dir.display()))?;
    }

    Ok(())
}

/// @ai:intent Check that generated trees are valid Python and importable
/// @ai:effects fs:write, io
fn verify(config_path: Option<PathBuf>, interpreter: Option<String>) -> Result<()> {
    let config = load_or_default_config(config_path, interpreter)?;
    config.validate()?;

    let toolchain = ToolchainValidator::validate(&config.interpreter)?;
    let tempdir = tempfile::Builder::new()
        .suffix(TEMPDIR_SUFFIX)
        .tempdir()
        .context("Failed to create scratch directory")?;

    let generator = SourceTreeGenerator::new(config.layout.clone());
    let checker = SyntaxChecker::new(toolchain.program.clone());
    let launcher = PythonLauncher::new(toolchain.program.clone());
    let mut failed = Vec::new();

    for variant in Variant::ALL {
        let tree = generator.generate(tempdir.path(), variant)?;
        let result = verify_tree(&tree, &checker, &launcher)?;

        if result.success {
            println!("{}: {} files OK", variant, result.files_checked);
        } else {
            println!("{}: {} errors", variant, result.errors.len());

            for err in &result.errors {
                println!("  - {}", err);
            }

            failed.push(variant);
        }
    }

    if !failed.is_empty() {
        anyhow::bail!("Verification failed for {} variant(s)", failed.len());
    }

    println!("Verification passed!");
    Ok(())
}

/// @ai:intent Generate reports from saved results
/// @ai:effects fs:read, fs:write
fn generate_reports(results_path: PathBuf, output_dir: PathBuf) -> Result<()> {
    let results = ReportGenerator::new().regenerate(&results_path, &output_dir)?;

    for variant in &results.variants {
        println!("{}", ConsoleReporter::banner(variant.variant));
        println!("{}", ConsoleReporter::import_time_line(&variant.timing));
        println!("{}", ConsoleReporter::memory_line(&variant.memory));
    }

    println!("Reports generated in {}", output_dir.display());
    Ok(())
}

/// @ai:intent Initialize default configuration file
/// @ai:effects fs:write
fn init_config(output: PathBuf) -> Result<()> {
    let config = BenchConfig::default();
    config.save(&output)?;
    println!("Configuration saved to {}", output.display());
    Ok(())
}

/// @ai:intent Load configuration or use defaults, applying an interpreter override
/// @ai:effects fs:read
fn load_or_default_config(path: Option<PathBuf>, interpreter: Option<String>) -> Result<BenchConfig> {
    let mut config = match path {
        Some(p) => BenchConfig::load(&p)
            .with_context(|| format!("Failed to load configuration from {}", p.display()))?,
        None => BenchConfig::default(),
    };

    if let Some(interpreter) = interpreter {
        config.interpreter = interpreter;
    }

    Ok(config)
}
