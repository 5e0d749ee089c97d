//! @ai:module:intent Configuration structs for the annotation import benchmark
//! @ai:module:layer infrastructure
//! @ai:module:public_api BenchConfig, LayoutConfig, RunConfig
//! @ai:module:stateless true

use crate::error::BenchError;
use serde::{Deserialize, Serialize};

/// @ai:intent Main configuration for the benchmark
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    #[serde(default = "default_interpreter")]
    pub interpreter: String,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub run: RunConfig,
}

/// @ai:intent Shape of the generated package tree
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_packages")]
    pub packages: usize,
    #[serde(default = "default_modules_per_package")]
    pub modules_per_package: usize,
    #[serde(default = "default_functions_per_module")]
    pub functions_per_module: usize,
}

/// @ai:intent Trial configuration for a benchmark run
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_trials")]
    pub trials: usize,
    #[serde(default = "default_warmup")]
    pub warmup: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
            layout: LayoutConfig::default(),
            run: RunConfig::default(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            packages: default_packages(),
            modules_per_package: default_modules_per_package(),
            functions_per_module: default_functions_per_module(),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            trials: default_trials(),
            warmup: default_warmup(),
        }
    }
}

fn default_interpreter() -> String {
    "python3".to_string()
}

fn default_packages() -> usize {
    10
}

fn default_modules_per_package() -> usize {
    100
}

fn default_functions_per_module() -> usize {
    100
}

fn default_trials() -> usize {
    21
}

fn default_warmup() -> usize {
    1
}

impl LayoutConfig {
    /// @ai:intent Total number of generated modules
    /// @ai:effects pure
    pub fn total_modules(&self) -> usize {
        self.packages * self.modules_per_package
    }
}

impl BenchConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @ai:intent Reject configurations that cannot produce statistics
    /// @ai:post Ok implies at least two samples survive warm-up exclusion
    /// @ai:effects pure
    pub fn validate(&self) -> Result<(), BenchError> {
        if self.interpreter.trim().is_empty() {
            return Err(BenchError::InvalidConfig(
                "interpreter must not be empty".to_string(),
            ));
        }

        if self.layout.packages == 0 || self.layout.modules_per_package == 0 {
            return Err(BenchError::InvalidConfig(
                "layout must contain at least one package and one module per package".to_string(),
            ));
        }

        if self.run.warmup == 0 {
            return Err(BenchError::InvalidConfig(
                "warmup must discard at least the first trial".to_string(),
            ));
        }

        if self.run.trials < self.run.warmup + 2 {
            return Err(BenchError::InvalidConfig(format!(
                "trials ({}) must exceed warmup ({}) by at least two",
                self.run.trials, self.run.warmup
            )));
        }

        Ok(())
    }
}
