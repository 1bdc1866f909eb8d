//! Compilation Driver
//!
//! One pass compiles the whole project and answers every queued request:
//!
//! ```text
//! handle_file_system_event ─> config ─> report config errors
//!        │ Changed                          │
//!        v                                  v
//!   drop cache + host           create_program (CachingHost)
//!                                           │
//!                     cache baseline <──────┤
//!                                           v
//!                      pre-emit diagnostics ─> emit ─> dispatch
//! ```
//!
//! # Module Structure
//!
//! - `queue` - Compile requests waiting for the next pass
//! - `cache` - The previous pass's program
//! - `host` - Source resolution override and output capture hooks
//! - `output` - Captured emitted text
//! - `dispatch` - Resolve requests against the new program

mod cache;
mod dispatch;
mod host;
mod output;
mod queue;


use std::sync::Arc;
use std::time::{Duration, Instant};

pub use cache::ProgramCache;
pub use dispatch::CompiledFile;
pub use host::CachingHost;
pub use output::CompiledOutputs;
pub use queue::{Callback, CompileRequest, EmitQueue, InputFile};

use crate::backend::{Backend, BoxedHost, CompilerHost, Program};
use crate::config::BatchConfig;
use crate::diagnostic::DiagnosticReporter;
use crate::error::CompileError;
use crate::logger::Logger;
use crate::project::Project;
use crate::utils::plural::plural_count;

/// What a successful pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassSummary {
    /// Project files handed to the backend
    pub files: usize,
    /// Requests resolved with a compiled file
    pub delivered: usize,
    /// Source units reused from the previous program
    pub cache_hits: usize,
    /// Whether the cached program was dropped before this pass
    pub invalidated: bool,
    pub elapsed: Duration,
}

/// Synchronous compilation driver.
///
/// Requests are queued with [`enqueue`](Self::enqueue) and answered by the
/// next [`run_pass`](Self::run_pass). The async [`Compiler`](crate::Compiler)
/// wraps one of these and decides when passes run.
pub struct IncrementalCompiler<B: Backend, J: Project> {
    backend: B,
    project: J,
    logger: Arc<dyn Logger>,
    reporter: DiagnosticReporter,
    batch: BatchConfig,
    /// Refresh `batch` from the project before every pass
    follow_project: bool,
    queue: EmitQueue<B::Unit>,
    /// Backend default host, rebuilt after a file-system change
    host: Option<BoxedHost<B::Unit>>,
    cache: ProgramCache<B::Program>,
    outputs: CompiledOutputs,
}

impl<B: Backend, J: Project> IncrementalCompiler<B, J> {
    pub(crate) fn new(
        backend: B,
        project: J,
        logger: Arc<dyn Logger>,
        reporter: DiagnosticReporter,
        batch: Option<BatchConfig>,
    ) -> Self {
        let follow_project = batch.is_none();
        let batch = batch
            .or_else(|| project.batch_config())
            .unwrap_or_default();
        Self {
            backend,
            project,
            logger,
            reporter,
            batch,
            follow_project,
            queue: EmitQueue::default(),
            host: None,
            cache: ProgramCache::default(),
            outputs: CompiledOutputs::default(),
        }
    }

    pub fn enqueue(&mut self, request: CompileRequest<B::Unit>) {
        self.queue.push(request);
    }

    /// Number of requests waiting for the next pass.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn batch_config(&self) -> &BatchConfig {
        &self.batch
    }

    /// Everything captured so far.
    pub fn outputs(&self) -> &CompiledOutputs {
        &self.outputs
    }

    /// The cached program from the last pass.
    pub fn program(&self) -> Option<&B::Program> {
        self.cache.program()
    }

    /// Compile the project and answer every queued request.
    ///
    /// On error every queued request has been resolved or discarded: a
    /// project failure or dispatch mismatch resolves them with an error,
    /// fail-fast (when the terminator returns) drops them.
    pub fn run_pass(&mut self) -> Result<PassSummary, CompileError> {
        let start = Instant::now();
        self.logger.info(&format!(
            "compiling project using {} {}",
            self.backend.name(),
            self.backend.version()
        ));

        let changed = self.project.handle_file_system_event().is_changed();
        // Invalidate before anything can fail, the change signal is consumed
        let invalidated = changed && self.cache.invalidate();
        if changed {
            self.host = None;
        }
        if invalidated {
            crate::debug!("cache"; "file system changed, dropped cached program");
        }
        if self.follow_project
            && let Some(batch) = self.project.batch_config()
        {
            self.batch = batch;
        }

        let config = match self.project.config() {
            Ok(config) => config,
            Err(err) => {
                let err = CompileError::from(err);
                self.logger.error(&err.to_string());
                self.queue.fail_all(&err);
                return Err(err);
            }
        };

        let inner: &dyn CompilerHost<B::Unit> = &**self
            .host
            .get_or_insert_with(|| self.backend.create_host(&config.options));

        if let Err(err) = self.reporter.report(&config.errors, &config.options) {
            let dropped = self.queue.discard();
            crate::debug!("compile"; "discarded {}", plural_count(dropped, "request"));
            return Err(err);
        }

        let queued = self.queue.queued_paths();
        let (program, cache_hits) = {
            let host = CachingHost::new(inner, self.cache.program(), &queued, &self.outputs);
            let program = self
                .backend
                .create_program(&config.file_names, &config.options, &host);
            (program, host.cache_hits())
        };
        crate::debug!(
            "cache";
            "{} reused, {} queued",
            plural_count(cache_hits, "source unit"),
            plural_count(queued.len(), "file")
        );
        let program = self.cache.replace(program);

        let diagnostics = self.backend.pre_emit_diagnostics(program);
        if let Err(err) = self.reporter.report(&diagnostics, &config.options) {
            let dropped = self.queue.discard();
            crate::debug!("compile"; "discarded {}", plural_count(dropped, "request"));
            return Err(err);
        }

        let emit_host = CachingHost::new(inner, Some(program), &queued, &self.outputs)
            .forward_writes(self.batch.write_to_disk);
        program.emit(&emit_host);

        let elapsed = start.elapsed();
        self.logger.info(&format!(
            "compiled {} in {} ms",
            plural_count(config.file_names.len(), "file"),
            elapsed.as_millis()
        ));

        let delivered = dispatch::dispatch(self.queue.take(), program, &self.outputs, &self.batch)
            .inspect_err(|err| self.logger.error(&err.to_string()))?;

        Ok(PassSummary {
            files: config.file_names.len(),
            delivered,
            cache_hits,
            invalidated,
            elapsed,
        })
    }
}
