//! Project provider.
//!
//! Before every pass the driver asks the project two things:
//! - [`Project::handle_file_system_event`]: did the project's file set change?
//!   A change drops the whole program cache.
//! - [`Project::config`]: the current file list, options and config diagnostics.
//!
//! A project may also carry batching settings ([`Project::batch_config`]).
//!
//! # Module Structure
//!
//! - `watched` - [`WatchedProject`], backed by `batchc.toml` and a file watcher
//! - `scan` - Source file collection

mod scan;
mod watched;

use std::path::PathBuf;

use thiserror::Error;

use crate::config::{BatchConfig, CompilerOptions};
use crate::diagnostic::Diagnostic;

pub use watched::WatchedProject;

/// Result of polling the project for file-system changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsEvent {
    Unchanged,
    Changed,
}

impl FsEvent {
    pub fn is_changed(self) -> bool {
        self == FsEvent::Changed
    }
}

/// Resolved project state for one pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectConfig {
    pub file_names: Vec<PathBuf>,
    pub options: CompilerOptions,
    /// Problems found while reading the configuration.
    pub errors: Vec<Diagnostic>,
}

/// Project provider failures.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("IO error when reading `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("file watcher failed")]
    Watch(#[from] notify::Error),
}

/// Source of the project's file list and options.
pub trait Project: Send + 'static {
    /// Report whether the file system changed since the previous call.
    fn handle_file_system_event(&mut self) -> FsEvent;

    /// Current configuration. Called once per pass.
    fn config(&self) -> Result<ProjectConfig, ProjectError>;

    /// Batching settings owned by the project, if it has any.
    ///
    /// Read when the compiler is built and before every pass, unless the
    /// builder was given explicit settings.
    fn batch_config(&self) -> Option<BatchConfig> {
        None
    }
}
