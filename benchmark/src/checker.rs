//! @ai:module:intent Syntax and import checks for generated source trees
//! @ai:module:layer infrastructure
//! @ai:module:public_api SyntaxChecker, SyntaxCheckerTrait, CheckResult, verify_tree
//! @ai:module:stateless true

use crate::error::{BenchError, Result};
use crate::generator::GeneratedTree;
use crate::runner::ModuleLauncherTrait;
use std::path::Path;
use std::process::Command;
use walkdir::WalkDir;

/// @ai:intent Result of checking a generated tree
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub success: bool,
    pub files_checked: usize,
    pub errors: Vec<String>,
}

/// @ai:intent Trait for syntax checking a generated tree
pub trait SyntaxCheckerTrait: Send + Sync {
    /// @ai:intent Check that every module of the tree compiles
    fn check_tree(&self, tree: &GeneratedTree) -> Result<CheckResult>;
}

/// @ai:intent Byte-compiles generated modules with the interpreter's compileall
pub struct SyntaxChecker {
    program: String,
}

impl SyntaxChecker {
    /// @ai:intent Create a checker for the given interpreter program
    /// @ai:effects pure
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl SyntaxCheckerTrait for SyntaxChecker {
    /// @ai:intent Run `<program> -m compileall -q` over the tree root
    /// @ai:effects fs:write, io
    fn check_tree(&self, tree: &GeneratedTree) -> Result<CheckResult> {
        let files_checked = count_python_files(&tree.root);

        let output = Command::new(&self.program)
            .arg("-m")
            .arg("compileall")
            .arg("-q")
            .arg(&tree.root)
            .output()
            .map_err(|source| BenchError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let combined = format!("{}{}", stdout, stderr);

        tracing::debug!("compileall output for {}: {}", tree.variant, combined);

        let errors: Vec<String> = combined
            .lines()
            .filter(|l| l.contains("Error"))
            .map(|l| l.trim().to_string())
            .collect();

        Ok(CheckResult {
            success: output.status.success() && errors.is_empty(),
            files_checked,
            errors,
        })
    }
}

/// @ai:intent Count Python files below a directory
/// @ai:effects fs:read
fn count_python_files(dir: &Path) -> usize {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path()
                .extension()
                .map(|ext| ext == "py")
                .unwrap_or(false)
        })
        .count()
}

/// @ai:intent Syntax check a tree, then import its aggregator once
/// @ai:post Ok(result) with result.success implies the aggregator imported with exit code zero
/// @ai:effects fs:write, io
pub fn verify_tree<C, L>(tree: &GeneratedTree, checker: &C, launcher: &L) -> Result<CheckResult>
where
    C: SyntaxCheckerTrait,
    L: ModuleLauncherTrait,
{
    let result = checker.check_tree(tree)?;

    if !result.success {
        for err in &result.errors {
            tracing::warn!("{}: {}", tree.variant, err);
        }
        return Ok(result);
    }

    launcher.run_module(&tree.workdir, &tree.aggregator_module())?;
    tracing::info!(
        "{}: {} files compiled, aggregator imported",
        tree.variant,
        result.files_checked
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::generator::{SourceTreeGenerator, Variant};
    use crate::runner::{program_available, PythonLauncher};
    use tempfile::TempDir;

    fn generate(dir: &Path, variant: Variant) -> GeneratedTree {
        let layout = LayoutConfig {
            packages: 2,
            modules_per_package: 3,
            functions_per_module: 5,
        };
        SourceTreeGenerator::new(layout).generate(dir, variant).unwrap()
    }

    #[test]
    fn test_generated_trees_compile_and_import() {
        if !program_available("python3") {
            return;
        }

        let temp = TempDir::new().unwrap();
        let checker = SyntaxChecker::new("python3");
        let launcher = PythonLauncher::new("python3");

        for variant in Variant::ALL {
            let tree = generate(temp.path(), variant);
            let result = verify_tree(&tree, &checker, &launcher).unwrap();

            assert!(result.success, "{variant}: {:?}", result.errors);
            assert_eq!(result.files_checked, 8);
        }
    }

    #[test]
    fn test_broken_module_is_reported() {
        if !program_available("python3") {
            return;
        }

        let temp = TempDir::new().unwrap();
        let tree = generate(temp.path(), Variant::NoFuture);
        std::fs::write(&tree.modules[2], "def broken(:\n").unwrap();

        let result = SyntaxChecker::new("python3").check_tree(&tree).unwrap();

        assert!(!result.success);
        assert!(!result.errors.is_empty());
    }

    #[test]
    fn test_missing_interpreter_is_spawn_error() {
        let temp = TempDir::new().unwrap();
        let tree = generate(temp.path(), Variant::WithFuture);

        let err = SyntaxChecker::new("nonexistent_tool_xyz")
            .check_tree(&tree)
            .unwrap_err();
        assert!(matches!(err, BenchError::Spawn { .. }));
    }
}
