//! Project manifest (`batchc.toml`).
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── project    # [project]
//! │   ├── options    # [compiler_options]
//! │   └── batch      # [batch]
//! └── mod.rs         # ProjectManifest (this file)
//! ```
//!
//! A broken manifest never aborts: every problem becomes a config
//! [`Diagnostic`] and the affected sections fall back to their defaults,
//! so the driver can report them like any other compiler output.

pub mod section;

pub use section::{BatchConfig, CompilerOptions, DEFAULT_QUIET_PERIOD_MS, ProjectSection};

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::diagnostic::{Diagnostic, Location, line_and_column};

/// Default manifest file name.
pub const MANIFEST_NAME: &str = "batchc.toml";

/// Diagnostic codes for manifest problems.
pub mod codes {
    pub const PARSE: &str = "CFG5000";
    pub const UNREADABLE: &str = "CFG5001";
    pub const MISSING_INCLUDE: &str = "CFG5002";
    pub const UNKNOWN_FIELD: &str = "CFG5003";
    pub const MISSING_FILE: &str = "CFG5004";
}

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing batchc.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectManifest {
    /// Project file set
    #[serde(default)]
    pub project: ProjectSection,

    /// Options passed to the backend
    #[serde(default)]
    pub compiler_options: CompilerOptions,

    /// Request batching settings
    #[serde(default)]
    pub batch: BatchConfig,
}

impl ProjectManifest {
    /// Read and parse a manifest file.
    ///
    /// Returns the manifest (defaults on failure) and the diagnostics found.
    pub fn load(path: &Path) -> (Self, Vec<Diagnostic>) {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content, path),
            Err(err) => {
                let diagnostic = Diagnostic::error(
                    codes::UNREADABLE,
                    format!("Cannot read file '{}': {err}.", path.display()),
                );
                (Self::default(), vec![diagnostic])
            }
        }
    }

    /// Parse manifest content. `path` is only used to locate diagnostics.
    pub fn parse(content: &str, path: &Path) -> (Self, Vec<Diagnostic>) {
        match Self::parse_with_ignored(content) {
            Ok((manifest, ignored)) => {
                let diagnostics = ignored
                    .into_iter()
                    .map(|field| {
                        Diagnostic::warning(
                            codes::UNKNOWN_FIELD,
                            format!("Unknown field '{field}' in {}, ignoring.", file_label(path)),
                        )
                    })
                    .collect();
                (manifest, diagnostics)
            }
            Err(err) => {
                let mut diagnostic = Diagnostic::error(codes::PARSE, err.message().trim());
                if let Some(span) = err.span() {
                    let (line, column) = line_and_column(content, span.start);
                    diagnostic = diagnostic.at(Location::new(path, line, column));
                }
                (Self::default(), vec![diagnostic])
            }
        }
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), toml::de::Error> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let manifest = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((manifest, ignored))
    }
}

/// Show only the file name, the manifest always sits at the project root.
fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
