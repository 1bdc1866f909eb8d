//! Completion dispatch: resolve each queued request against the new program.

use std::fmt;
use std::sync::Arc;

use super::output::CompiledOutputs;
use super::queue::CompileRequest;
use crate::backend::{Program, SourceUnit};
use crate::config::BatchConfig;
use crate::error::CompileError;

/// The artifact delivered to a requester.
pub struct CompiledFile<U> {
    pub is_declaration_file: bool,
    /// Captured text at the request's logical path.
    pub output_text: Option<String>,
    pub source_file: Arc<U>,
    /// Captured text at the logical path plus the map suffix.
    pub source_map_text: Option<String>,
}

impl<U> Clone for CompiledFile<U> {
    fn clone(&self) -> Self {
        Self {
            is_declaration_file: self.is_declaration_file,
            output_text: self.output_text.clone(),
            source_file: Arc::clone(&self.source_file),
            source_map_text: self.source_map_text.clone(),
        }
    }
}

impl<U> fmt::Debug for CompiledFile<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledFile")
            .field("is_declaration_file", &self.is_declaration_file)
            .field("output_text", &self.output_text)
            .field("source_map_text", &self.source_map_text)
            .finish_non_exhaustive()
    }
}

/// Resolve `requests` in order. Returns the number delivered.
///
/// A request whose original path is not in `program` gets
/// [`CompileError::MissingSource`]; every request after it gets
/// [`CompileError::Aborted`] and the mismatch is returned.
pub(super) fn dispatch<P: Program>(
    requests: Vec<CompileRequest<P::Unit>>,
    program: &P,
    outputs: &CompiledOutputs,
    batch: &BatchConfig,
) -> Result<usize, CompileError> {
    let mut delivered = 0;
    let mut requests = requests.into_iter();

    while let Some(request) = requests.next() {
        let Some(source_file) = program.get_source_file(&request.file.original_path) else {
            let missing = request.file.original_path.clone();
            request.resolve(Err(CompileError::MissingSource {
                path: missing.clone(),
            }));
            for rest in requests.by_ref() {
                rest.resolve(Err(CompileError::Aborted {
                    missing: missing.clone(),
                }));
            }
            return Err(CompileError::MissingSource { path: missing });
        };

        let path = &request.file.path;
        let compiled = CompiledFile {
            is_declaration_file: source_file.is_declaration_file(),
            output_text: outputs.get(path),
            source_map_text: outputs.get(&batch.map_path(path)),
            source_file,
        };
        request.resolve(Ok(compiled));
        delivered += 1;
    }

    Ok(delivered)
}
