//! @ai:module:intent Subprocess launching and trial execution
//! @ai:module:layer infrastructure
//! @ai:module:public_api BenchmarkExecutor, ModuleLauncherTrait, PythonLauncher, ScriptedLauncher

pub mod executor;
pub mod launcher;

pub use executor::{create_executor, BenchmarkExecutor, TEMPDIR_SUFFIX};
pub use launcher::{
    program_available, ModuleLauncherTrait, ModuleOutput, PythonLauncher, ScriptedLauncher,
};
