//! Host decorator wrapped around the backend's default host for one pass.
//!
//! ```text
//! backend ──get_source_file──> CachingHost ──(queued or not cached)──> inner host
//!                                   │
//!                                   └──(cached)──> previous program's unit
//! backend ──write_file──> CachingHost ──> CompiledOutputs (+ inner if write_to_disk)
//! ```

use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustc_hash::FxHashSet;

use super::output::CompiledOutputs;
use crate::backend::{CompilerHost, Program};

/// Source resolution override and write interception.
pub struct CachingHost<'a, P: Program> {
    inner: &'a dyn CompilerHost<P::Unit>,
    /// Previous pass's program, `None` after invalidation
    cached: Option<&'a P>,
    /// Original paths of queued requests; never served from cache
    queued: &'a FxHashSet<PathBuf>,
    outputs: &'a CompiledOutputs,
    forward_writes: bool,
    hits: Cell<usize>,
}

impl<'a, P: Program> CachingHost<'a, P> {
    pub fn new(
        inner: &'a dyn CompilerHost<P::Unit>,
        cached: Option<&'a P>,
        queued: &'a FxHashSet<PathBuf>,
        outputs: &'a CompiledOutputs,
    ) -> Self {
        Self {
            inner,
            cached,
            queued,
            outputs,
            forward_writes: false,
            hits: Cell::new(0),
        }
    }

    /// Also pass captured writes on to the inner host.
    pub fn forward_writes(mut self, forward: bool) -> Self {
        self.forward_writes = forward;
        self
    }

    /// Source units served from the cached program so far.
    pub fn cache_hits(&self) -> usize {
        self.hits.get()
    }
}

impl<P: Program> CompilerHost<P::Unit> for CachingHost<'_, P> {
    fn get_source_file(&self, path: &Path) -> Option<Arc<P::Unit>> {
        if !self.queued.contains(path)
            && let Some(unit) = self.cached.and_then(|program| program.get_source_file(path))
        {
            self.hits.set(self.hits.get() + 1);
            return Some(unit);
        }
        self.inner.get_source_file(path)
    }

    fn write_file(&self, path: &Path, text: &str) {
        self.outputs.record(path, text);
        if self.forward_writes {
            self.inner.write_file(path, text);
        }
    }
}
