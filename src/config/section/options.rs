//! `[compiler_options]` section configuration.
//!
//! Handed to the backend untouched. Only `no_emit_on_error` is interpreted
//! here: it turns any reported diagnostic into a fail-fast exit.
//!
//! # Example
//!
//! ```toml
//! [compiler_options]
//! no_emit_on_error = true
//! out_dir = "dist"
//! source_map = true
//! target = "es2020"           # unknown keys are kept in `extra`
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Compiler option set passed through to the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerOptions {
    /// Terminate when any diagnostic is reported.
    pub no_emit_on_error: bool,

    /// Output directory for emitted files.
    pub out_dir: Option<PathBuf>,

    /// Emit source maps next to generated files.
    pub source_map: bool,

    /// Backend-specific options.
    #[serde(flatten)]
    pub extra: BTreeMap<String, toml::Value>,
}

impl CompilerOptions {
    /// Look up a backend-specific option.
    pub fn get(&self, key: &str) -> Option<&toml::Value> {
        self.extra.get(key)
    }
}
