//! @ai:module:intent Define error types for benchmark generation, execution and statistics
//! @ai:module:layer domain
//! @ai:module:public_api BenchError, Result
//! @ai:module:stateless true

use std::path::PathBuf;
use thiserror::Error;

/// @ai:intent Unified error type for generator, runner and statistics operations
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Module {module} exited with {status}\n{stderr}")]
    ModuleFailed {
        module: String,
        status: String,
        stderr: String,
    },

    #[error("{program} is not usable: {detail}. {hint}")]
    ToolchainMissing {
        program: String,
        detail: String,
        hint: &'static str,
    },

    #[error("Need at least {required} timing samples after warm-up, got {actual}")]
    InsufficientSamples { required: usize, actual: usize },

    #[error("Timing sample {index} is not a positive finite number: {value}")]
    InvalidSample { index: usize, value: f64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl BenchError {
    /// @ai:intent Build a path-tagged IO error mapper for use with map_err
    /// @ai:effects pure
    pub fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| BenchError::Io { path, source }
    }
}

pub type Result<T> = std::result::Result<T, BenchError>;
