//! @ai:module:intent Write a variant's synthetic package tree to disk
//! @ai:module:layer infrastructure
//! @ai:module:public_api SourceTreeGenerator, GeneratedTree, AGGREGATOR_MODULE, MEMORY_PROBE_MODULE
//! @ai:module:stateless true

use crate::config::LayoutConfig;
use crate::error::{BenchError, Result};
use crate::generator::templates::{
    render_function_pair, render_import, FUTURE_DIRECTIVE, MEMORY_PROBE_TEMPLATE,
    MODULE_EPILOGUE, OBJECT_TEMPLATE,
};
use crate::generator::Variant;
use std::fs;
use std::path::{Path, PathBuf};

/// Module that imports every generated module.
pub const AGGREGATOR_MODULE: &str = "aggregate";

/// Module that imports the aggregator and prints resident memory.
pub const MEMORY_PROBE_MODULE: &str = "memory_probe";

/// @ai:intent Summary of a generated tree, consumed by the runner and checker
#[derive(Debug, Clone)]
pub struct GeneratedTree {
    pub variant: Variant,
    /// Directory the interpreter must run from.
    pub workdir: PathBuf,
    pub root: PathBuf,
    pub packages: Vec<String>,
    pub modules: Vec<PathBuf>,
}

impl GeneratedTree {
    /// @ai:intent Dotted name of the aggregator module
    /// @ai:effects pure
    pub fn aggregator_module(&self) -> String {
        self.variant.qualified(AGGREGATOR_MODULE)
    }

    /// @ai:intent Dotted name of the memory probe module
    /// @ai:effects pure
    pub fn memory_probe_module(&self) -> String {
        self.variant.qualified(MEMORY_PROBE_MODULE)
    }
}

/// @ai:intent Emits templated Python modules into a package tree
pub struct SourceTreeGenerator {
    layout: LayoutConfig,
}

impl SourceTreeGenerator {
    /// @ai:intent Create a generator for the given layout
    /// @ai:effects pure
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    /// @ai:intent Render the source text shared by every module of a variant
    /// @ai:effects pure
    pub fn render_module(&self, variant: Variant) -> String {
        let mut source = String::new();

        if variant.defers_annotations() {
            source.push_str(FUTURE_DIRECTIVE);
        }

        source.push_str(OBJECT_TEMPLATE);

        for func_idx in 0..self.layout.functions_per_module {
            source.push_str(&render_function_pair(func_idx));
        }

        source.push_str(MODULE_EPILOGUE);
        source
    }

    /// @ai:intent Write the full package tree for a variant under workdir
    /// @ai:pre workdir exists and has no directory named after the variant
    /// @ai:post tree contains layout.packages packages of layout.modules_per_package modules
    /// @ai:effects fs:write
    pub fn generate(&self, workdir: &Path, variant: Variant) -> Result<GeneratedTree> {
        let root = workdir.join(variant.as_str());
        fs::create_dir(&root).map_err(BenchError::io(&root))?;

        let source = self.render_module(variant);
        let mut aggregator = String::new();
        let mut packages = Vec::with_capacity(self.layout.packages);
        let mut modules = Vec::with_capacity(self.layout.total_modules());

        for pkg_idx in 0..self.layout.packages {
            let package = format!("pkg{pkg_idx}");
            let package_dir = root.join(&package);
            fs::create_dir(&package_dir).map_err(BenchError::io(&package_dir))?;

            for offset in 0..self.layout.modules_per_package {
                let module = format!("module{}", pkg_idx * self.layout.modules_per_package + offset);
                let path = package_dir.join(format!("{module}.py"));
                fs::write(&path, &source).map_err(BenchError::io(&path))?;

                aggregator.push_str(&render_import(&package, &module));
                modules.push(path);
            }

            packages.push(package);
        }

        write_module(&root, AGGREGATOR_MODULE, &aggregator)?;
        write_module(&root, MEMORY_PROBE_MODULE, MEMORY_PROBE_TEMPLATE)?;

        tracing::debug!(
            "Generated {} modules in {} packages under {}",
            modules.len(),
            packages.len(),
            root.display()
        );

        Ok(GeneratedTree {
            variant,
            workdir: workdir.to_path_buf(),
            root,
            packages,
            modules,
        })
    }
}

/// @ai:intent Write a top-level module of the variant package
/// @ai:effects fs:write
fn write_module(root: &Path, name: &str, content: &str) -> Result<()> {
    let path = root.join(format!("{name}.py"));
    fs::write(&path, content).map_err(BenchError::io(&path))
}
