//! @ai:module:intent Interpreter subprocess launching for generated modules
//! @ai:module:layer infrastructure
//! @ai:module:public_api ModuleLauncherTrait, ModuleOutput, PythonLauncher, ScriptedLauncher
//! @ai:module:stateless false

use crate::error::{BenchError, Result};
use std::path::Path;
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Lines of child stderr kept in a failure report.
const STDERR_TAIL_LINES: usize = 20;

/// @ai:intent Captured output of a successful module run
#[derive(Debug, Clone, Default)]
pub struct ModuleOutput {
    pub stdout: String,
    pub stderr: String,
}

/// @ai:intent Trait for running a module in a fresh interpreter process
pub trait ModuleLauncherTrait: Send + Sync {
    /// @ai:intent Run `module` as a script from `cwd` and wait for it to exit
    /// @ai:post Ok only when the process exited with status zero
    fn run_module(&self, cwd: &Path, module: &str) -> Result<ModuleOutput>;
}

/// @ai:intent Launches `<program> -m <module>` subprocesses
pub struct PythonLauncher {
    program: String,
}

impl PythonLauncher {
    /// @ai:intent Create a launcher for the given interpreter program
    /// @ai:effects pure
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// @ai:intent Interpreter program this launcher spawns
    /// @ai:effects pure
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl ModuleLauncherTrait for PythonLauncher {
    /// @ai:intent Spawn the interpreter, block until exit, capture output
    /// @ai:effects io
    fn run_module(&self, cwd: &Path, module: &str) -> Result<ModuleOutput> {
        let output = Command::new(&self.program)
            .arg("-m")
            .arg(module)
            .current_dir(cwd)
            .output()
            .map_err(|source| BenchError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            return Err(BenchError::ModuleFailed {
                module: module.to_string(),
                status: output.status.to_string(),
                stderr: tail_lines(&stderr, STDERR_TAIL_LINES),
            });
        }

        Ok(ModuleOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: stderr.into_owned(),
        })
    }
}

/// @ai:intent Keep the last `count` lines of a process stream
/// @ai:effects pure
fn tail_lines(text: &str, count: usize) -> String {
    let lines: Vec<_> = text.lines().collect();
    let start = lines.len().saturating_sub(count);
    lines[start..].join("\n")
}

/// @ai:intent In-process launcher returning scripted output, for tests
pub struct ScriptedLauncher {
    stdout: String,
    fail_on_call: Option<usize>,
    delay: Duration,
    calls: AtomicUsize,
}

impl ScriptedLauncher {
    /// @ai:intent Create a launcher that always succeeds with the given stdout
    /// @ai:effects pure
    pub fn new(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            fail_on_call: None,
            delay: Duration::from_millis(1),
            calls: AtomicUsize::new(0),
        }
    }

    /// @ai:intent Make the n-th call (1-based) fail with a non-zero exit
    /// @ai:effects pure
    pub fn failing_on(mut self, call: usize) -> Self {
        self.fail_on_call = Some(call);
        self
    }

    /// @ai:intent Set how long each simulated run blocks
    /// @ai:effects pure
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// @ai:intent Number of run_module calls made so far
    /// @ai:effects pure
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ModuleLauncherTrait for ScriptedLauncher {
    fn run_module(&self, _cwd: &Path, module: &str) -> Result<ModuleOutput> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        std::thread::sleep(self.delay);

        if self.fail_on_call == Some(call) {
            return Err(BenchError::ModuleFailed {
                module: module.to_string(),
                status: "exit status: 1".to_string(),
                stderr: format!("scripted failure on call {call}"),
            });
        }

        Ok(ModuleOutput {
            stdout: self.stdout.clone(),
            stderr: String::new(),
        })
    }
}

/// @ai:intent Check whether a program answers `--version`
/// @ai:effects io
pub fn program_available(program: &str) -> bool {
    Command::new(program)
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_tail_lines_keeps_last_lines() {
        assert_eq!(tail_lines("a\nb\nc\nd", 2), "c\nd");
        assert_eq!(tail_lines("a", 5), "a");
        assert_eq!(tail_lines("", 3), "");
    }

    #[test]
    fn test_scripted_launcher_fails_on_requested_call() {
        let launcher = ScriptedLauncher::new("1.00 MB")
            .failing_on(2)
            .with_delay(Duration::ZERO);
        let cwd = Path::new(".");

        assert!(launcher.run_module(cwd, "pkg.first").is_ok());
        let err = launcher.run_module(cwd, "pkg.second").unwrap_err();
        assert!(matches!(err, BenchError::ModuleFailed { ref module, .. } if module == "pkg.second"));
        assert!(launcher.run_module(cwd, "pkg.third").is_ok());
        assert_eq!(launcher.calls(), 3);
    }

    #[test]
    fn test_missing_interpreter_is_spawn_error() {
        let launcher = PythonLauncher::new("nonexistent_interpreter_xyz");
        let err = launcher.run_module(Path::new("."), "anything").unwrap_err();
        assert!(matches!(err, BenchError::Spawn { .. }));
    }

    #[test]
    fn test_python_module_failure_is_reported() {
        if !program_available("python3") {
            return;
        }

        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("broken.py"), "raise SystemExit(3)\n").unwrap();

        let launcher = PythonLauncher::new("python3");
        let err = launcher.run_module(temp.path(), "broken").unwrap_err();

        match err {
            BenchError::ModuleFailed { module, status, .. } => {
                assert_eq!(module, "broken");
                assert!(status.contains('3'));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_python_module_output_is_captured() {
        if !program_available("python3") {
            return;
        }

        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("hello.py"), "print('hi')\n").unwrap();

        let output = PythonLauncher::new("python3")
            .run_module(temp.path(), "hello")
            .unwrap();
        assert_eq!(output.stdout.trim(), "hi");
    }
}
