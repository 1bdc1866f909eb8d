//! `[batch]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [batch]
//! quiet_period_ms = 250     # Delay after the last request before a pass starts
//! map_suffix = ".map"       # Source map sibling of an output path
//! write_to_disk = false     # Also let the backend host write outputs
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default quiet period between the last request and a pass.
pub const DEFAULT_QUIET_PERIOD_MS: u64 = 250;

/// Request batching and output capture settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Quiet period in milliseconds.
    pub quiet_period_ms: u64,

    /// Suffix appended to an output path to find its source map.
    pub map_suffix: String,

    /// Forward captured writes to the backend host as well.
    pub write_to_disk: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            quiet_period_ms: DEFAULT_QUIET_PERIOD_MS,
            map_suffix: ".map".into(),
            write_to_disk: false,
        }
    }
}

impl BatchConfig {
    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms)
    }

    /// Source map path for an output path (`dist/a.js` -> `dist/a.js.map`).
    pub fn map_path(&self, output: &Path) -> PathBuf {
        let mut name = OsString::from(output.as_os_str());
        name.push(&self.map_suffix);
        PathBuf::from(name)
    }
}
