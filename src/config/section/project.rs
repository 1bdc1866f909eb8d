//! `[project]` section configuration.
//!
//! Decides which files make up the project.
//!
//! # Example
//!
//! ```toml
//! [project]
//! include = ["src"]              # Directories walked for sources
//! extensions = ["ts", "tsx"]     # Source file extensions
//! exclude = ["node_modules"]     # Directory names skipped while walking
//! files = ["typings/globals.d.ts"]
//! watch = true                   # Watch the project root between passes
//! ```
//!
//! All paths are relative to the directory containing `batchc.toml`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Project file-set settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSection {
    /// Directories walked recursively for source files.
    pub include: Vec<PathBuf>,

    /// File extensions (without dot) counted as sources.
    pub extensions: Vec<String>,

    /// Directory names skipped while walking.
    pub exclude: Vec<String>,

    /// Explicit files added regardless of extension.
    pub files: Vec<PathBuf>,

    /// Use a file-system watcher instead of rescanning before every pass.
    pub watch: bool,
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            include: vec![PathBuf::from("src")],
            extensions: vec!["ts".into(), "tsx".into()],
            exclude: vec!["node_modules".into()],
            files: Vec::new(),
            watch: true,
        }
    }
}

impl ProjectSection {
    /// Whether `ext` is one of the configured source extensions.
    pub fn matches_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.trim_start_matches('.') == ext)
    }

    /// Whether a directory with this name is skipped.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude.iter().any(|e| e == name)
    }
}
