//! Output capture: emitted text keyed by output path.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

/// Everything the backend wrote, across all passes.
///
/// Never cleared: a pass that writes a path replaces the previous text.
#[derive(Debug, Default)]
pub struct CompiledOutputs {
    files: Mutex<FxHashMap<PathBuf, String>>,
}

impl CompiledOutputs {
    pub fn record(&self, path: &Path, text: &str) {
        self.files.lock().insert(path.to_path_buf(), text.to_owned());
    }

    pub fn get(&self, path: &Path) -> Option<String> {
        self.files.lock().get(path).cloned()
    }

    pub fn len(&self) -> usize {
        self.files.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.lock().is_empty()
    }
}
