//! Emit queue: compile requests waiting for the next pass.

use std::fmt;
use std::path::PathBuf;

use rustc_hash::FxHashSet;

use super::dispatch::CompiledFile;
use crate::error::CompileError;

/// A file a caller wants compiled.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InputFile {
    /// Logical path; captured output is looked up under this path.
    pub path: PathBuf,
    /// On-disk source path, as it appears in the project file list.
    pub original_path: PathBuf,
}

impl InputFile {
    pub fn new(path: impl Into<PathBuf>, original_path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            original_path: original_path.into(),
        }
    }
}

/// Completion callback, invoked exactly once unless fail-fast discards it.
pub type Callback<U> = Box<dyn FnOnce(Result<CompiledFile<U>, CompileError>) + Send>;

/// A queued request.
pub struct CompileRequest<U> {
    pub file: InputFile,
    callback: Callback<U>,
}

impl<U> CompileRequest<U> {
    pub fn new(
        file: InputFile,
        callback: impl FnOnce(Result<CompiledFile<U>, CompileError>) + Send + 'static,
    ) -> Self {
        Self {
            file,
            callback: Box::new(callback),
        }
    }

    pub(crate) fn resolve(self, result: Result<CompiledFile<U>, CompileError>) {
        (self.callback)(result);
    }
}

impl<U> fmt::Debug for CompileRequest<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompileRequest")
            .field("file", &self.file)
            .finish_non_exhaustive()
    }
}

/// Requests in arrival order. Duplicates are kept as separate entries.
pub struct EmitQueue<U> {
    requests: Vec<CompileRequest<U>>,
}

impl<U> Default for EmitQueue<U> {
    fn default() -> Self {
        Self {
            requests: Vec::new(),
        }
    }
}

impl<U> EmitQueue<U> {
    pub fn push(&mut self, request: CompileRequest<U>) {
        self.requests.push(request);
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Original paths of all queued requests.
    pub fn queued_paths(&self) -> FxHashSet<PathBuf> {
        self.requests
            .iter()
            .map(|r| r.file.original_path.clone())
            .collect()
    }

    /// Remove and return every request, leaving the queue empty.
    pub fn take(&mut self) -> Vec<CompileRequest<U>> {
        std::mem::take(&mut self.requests)
    }

    /// Resolve every request with `err` and empty the queue.
    pub fn fail_all(&mut self, err: &CompileError) {
        for request in self.take() {
            request.resolve(Err(err.clone()));
        }
    }

    /// Empty the queue without invoking any callback.
    pub fn discard(&mut self) -> usize {
        self.take().len()
    }
}
