//! batchc - coalesce per-file compile requests into whole-project compiler passes.
//!
//! Callers ask for single files; the compiler backend only knows how to build
//! the entire project. This crate sits in between:
//!
//! ```text
//! compile(file) ─┐
//! compile(file) ─┼─> CompilerActor ──(quiet period)──> IncrementalCompiler ──> Backend
//! compile(file) ─┘     (queue +                          (cache, capture,
//!                       debounce)                         diagnostics, dispatch)
//! ```
//!
//! # Module Structure
//!
//! - `actor` - Request queue, debouncer and the public [`Compiler`] handle
//! - `compiler` - One compilation pass: cache, host override, output capture, dispatch
//! - `backend` - Traits the whole-project compiler backend implements
//! - `project` - Project provider trait and the file-system backed [`WatchedProject`]
//! - `diagnostic` - Diagnostic model, formatting and fail-fast reporting
//! - `config` - `batchc.toml` manifest
//! - `logger` - Colored terminal logging and the [`Logger`] collaborator

pub mod logger;

pub mod actor;
pub mod backend;
pub mod compiler;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod project;
mod utils;

#[cfg(test)]
mod testing;

pub use actor::{Compiler, CompilerBuilder};
pub use backend::{Backend, CompilerHost, Program, SourceUnit};
pub use compiler::{CompileRequest, CompiledFile, IncrementalCompiler, InputFile, PassSummary};
pub use config::{BatchConfig, CompilerOptions};
pub use diagnostic::{Diagnostic, ExitStatus, Location, Severity, Terminator};
pub use error::CompileError;
pub use logger::{ConsoleLogger, Logger};
pub use project::{FsEvent, Project, ProjectConfig, ProjectError, WatchedProject};
