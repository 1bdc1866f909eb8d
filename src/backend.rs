//! Whole-project compiler backend interface.
//!
//! The backend parses, type-checks and generates code; this crate only
//! decides when it runs and what it sees. Reads and writes go through a
//! [`CompilerHost`], which the driver wraps to serve cached source units and
//! to capture emitted text.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::CompilerOptions;
use crate::diagnostic::Diagnostic;

/// A parsed input file.
pub trait SourceUnit: Send + Sync + 'static {
    fn file_name(&self) -> &Path;

    /// Declaration-only file (no emitted code of its own).
    fn is_declaration_file(&self) -> bool;
}

/// Read/write hooks used by the backend during a pass.
pub trait CompilerHost<U> {
    /// Resolve a path to its source unit, `None` if the file cannot be read.
    fn get_source_file(&self, path: &Path) -> Option<Arc<U>>;

    /// Receive an emitted file.
    fn write_file(&self, path: &Path, text: &str);
}

/// The compiled state of the whole project after one pass.
pub trait Program: Send + 'static {
    type Unit: SourceUnit;

    fn get_source_file(&self, path: &Path) -> Option<Arc<Self::Unit>>;

    /// Generate output, writing every file through `host`.
    fn emit(&self, host: &dyn CompilerHost<Self::Unit>);
}

/// Default host handed out by a backend.
pub type BoxedHost<U> = Box<dyn CompilerHost<U> + Send>;

/// The whole-project compiler.
pub trait Backend: Send + 'static {
    type Unit: SourceUnit;
    type Program: Program<Unit = Self::Unit>;

    /// Backend name for log output.
    fn name(&self) -> &str;

    fn version(&self) -> &str;

    /// Create the default host for a set of options.
    fn create_host(&self, options: &CompilerOptions) -> BoxedHost<Self::Unit>;

    /// Build a program over `file_names`, resolving sources through `host`.
    fn create_program(
        &self,
        file_names: &[PathBuf],
        options: &CompilerOptions,
        host: &dyn CompilerHost<Self::Unit>,
    ) -> Self::Program;

    /// Syntactic and semantic diagnostics for the whole program.
    fn pre_emit_diagnostics(&self, program: &Self::Program) -> Vec<Diagnostic>;
}
