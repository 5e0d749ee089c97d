//! @ai:module:intent Validate the benchmarked interpreter before running
//! @ai:module:layer infrastructure
//! @ai:module:public_api ToolchainValidator, ToolchainStatus
//! @ai:module:stateless true

use crate::error::{BenchError, Result};
use regex::Regex;
use std::process::Command;

/// Oldest interpreter that evaluates `X | Y` and `TypeAlias` at import time.
pub const MIN_PYTHON: (u32, u32) = (3, 10);

/// @ai:intent Status of a validated interpreter
#[derive(Debug, Clone)]
pub struct ToolchainStatus {
    pub program: String,
    pub version: String,
}

/// @ai:intent Validates that the configured interpreter is installed
pub struct ToolchainValidator;

impl ToolchainValidator {
    /// @ai:intent Get install hint for an interpreter program
    /// @ai:effects pure
    fn get_install_hint(program: &str) -> &'static str {
        let name = std::path::Path::new(program)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(program);

        if name.starts_with("python") {
            "Install Python 3.10 or newer: https://www.python.org/downloads/"
        } else if name.starts_with("pypy") {
            "Install PyPy: https://www.pypy.org/download.html"
        } else {
            "Pass --interpreter with a Python 3.10+ executable"
        }
    }

    /// @ai:intent Pick the version banner from `--version` output
    /// @ai:effects pure
    fn parse_version(stdout: &str, stderr: &str) -> String {
        // Old interpreters print the banner on stderr
        let banner = if stdout.trim().is_empty() { stderr } else { stdout };
        banner.lines().next().unwrap_or_default().trim().to_string()
    }

    /// @ai:intent Extract major and minor from a `Python X.Y[.Z]` banner
    /// @ai:example "Python 3.12.1" -> Some((3, 12))
    /// @ai:effects pure
    fn parse_major_minor(version: &str) -> Option<(u32, u32)> {
        let re = Regex::new(r"Python\s+(\d+)\.(\d+)").ok()?;
        let caps = re.captures(version)?;
        Some((caps[1].parse().ok()?, caps[2].parse().ok()?))
    }

    /// @ai:intent Reject interpreters older than MIN_PYTHON
    /// @ai:effects pure
    fn check_supported(program: &str, version: &str) -> Result<()> {
        match Self::parse_major_minor(version) {
            Some(found) if found < MIN_PYTHON => Err(BenchError::ToolchainMissing {
                program: program.to_string(),
                detail: format!(
                    "{} is older than Python {}.{}",
                    version, MIN_PYTHON.0, MIN_PYTHON.1
                ),
                hint: Self::get_install_hint(program),
            }),
            Some(_) => Ok(()),
            None => {
                tracing::warn!("Could not read a Python version from {:?}", version);
                Ok(())
            }
        }
    }

    /// @ai:intent Run `<program> --version` and return its status
    /// @ai:effects io
    pub fn validate(program: &str) -> Result<ToolchainStatus> {
        let output = Command::new(program)
            .arg("--version")
            .output()
            .map_err(|e| BenchError::ToolchainMissing {
                program: program.to_string(),
                detail: e.to_string(),
                hint: Self::get_install_hint(program),
            })?;

        if !output.status.success() {
            return Err(BenchError::ToolchainMissing {
                program: program.to_string(),
                detail: format!("--version exited with {}", output.status),
                hint: Self::get_install_hint(program),
            });
        }

        let version = Self::parse_version(
            &String::from_utf8_lossy(&output.stdout),
            &String::from_utf8_lossy(&output.stderr),
        );

        Self::check_supported(program, &version)?;

        tracing::info!("Using interpreter {} ({})", program, version);

        Ok(ToolchainStatus {
            program: program.to_string(),
            version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_install_hint_known_tools() {
        assert!(ToolchainValidator::get_install_hint("python3").contains("python.org"));
        assert!(ToolchainValidator::get_install_hint("/usr/bin/python3.12").contains("python.org"));
        assert!(ToolchainValidator::get_install_hint("pypy3").contains("pypy.org"));
        assert!(ToolchainValidator::get_install_hint("ruby").contains("--interpreter"));
    }

    #[test]
    fn test_parse_version_prefers_stdout() {
        assert_eq!(
            ToolchainValidator::parse_version("Python 3.12.1\n", ""),
            "Python 3.12.1"
        );
        assert_eq!(
            ToolchainValidator::parse_version("", "Python 2.7.18\n"),
            "Python 2.7.18"
        );
    }

    #[test]
    fn test_parse_major_minor() {
        assert_eq!(
            ToolchainValidator::parse_major_minor("Python 3.12.1"),
            Some((3, 12))
        );
        assert_eq!(
            ToolchainValidator::parse_major_minor("Python 2.7.18"),
            Some((2, 7))
        );
        assert_eq!(ToolchainValidator::parse_major_minor("ruby 3.3.0"), None);
    }

    #[test]
    fn test_check_supported_rejects_old_python() {
        for old in ["Python 2.7.18", "Python 3.9.18"] {
            let err = ToolchainValidator::check_supported("python3", old).unwrap_err();
            match err {
                BenchError::ToolchainMissing { detail, hint, .. } => {
                    assert!(detail.contains("3.10"));
                    assert!(hint.contains("3.10"));
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn test_check_supported_accepts_modern_python() {
        assert!(ToolchainValidator::check_supported("python3", "Python 3.10.0").is_ok());
        assert!(ToolchainValidator::check_supported("python3", "Python 3.13.2").is_ok());
        assert!(ToolchainValidator::check_supported("custom", "unknown banner").is_ok());
    }

    #[test]
    fn test_validate_nonexistent_interpreter() {
        let err = ToolchainValidator::validate("nonexistent_tool_xyz").unwrap_err();
        assert!(matches!(err, BenchError::ToolchainMissing { .. }));
    }
}
