//! Public entry point: a cloneable handle to the compiler actor.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use super::compiler::CompilerActor;
use super::messages::CompilerMsg;
use crate::backend::{Backend, SourceUnit};
use crate::compiler::{CompileRequest, CompiledFile, IncrementalCompiler, InputFile};
use crate::config::BatchConfig;
use crate::diagnostic::{DiagnosticReporter, ProcessExit, Terminator};
use crate::error::CompileError;
use crate::logger::{ConsoleLogger, Logger};
use crate::project::Project;

/// Handle for queueing compile requests.
///
/// Cheap to clone. When the last handle is dropped the actor answers
/// anything still queued and stops.
pub struct Compiler<U> {
    tx: mpsc::UnboundedSender<CompilerMsg<U>>,
}

impl<U> Clone for Compiler<U> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<U: SourceUnit> Compiler<U> {
    pub fn builder<B, J>(backend: B, project: J) -> CompilerBuilder<B, J>
    where
        B: Backend<Unit = U>,
        J: Project,
    {
        CompilerBuilder::new(backend, project)
    }

    /// Queue `file`; `callback` runs after the pass that compiles it.
    ///
    /// Fails only if the actor has stopped.
    pub fn compile(
        &self,
        file: InputFile,
        callback: impl FnOnce(Result<CompiledFile<U>, CompileError>) + Send + 'static,
    ) -> Result<(), CompileError> {
        self.tx
            .send(CompilerMsg::Compile(CompileRequest::new(file, callback)))
            .map_err(|_| CompileError::Closed)
    }

    /// Queue `file` and wait for its result.
    pub async fn compile_file(&self, file: InputFile) -> Result<CompiledFile<U>, CompileError> {
        let (tx, rx) = oneshot::channel();
        self.compile(file, move |result| {
            let _ = tx.send(result);
        })?;
        // Sender dropped without a result: fail-fast discarded the request
        rx.await.unwrap_or(Err(CompileError::Dropped))
    }

    /// Ask the actor to answer what is queued and stop.
    pub fn shutdown(&self) {
        let _ = self.tx.send(CompilerMsg::Shutdown);
    }
}

/// Assembles an [`IncrementalCompiler`] and optionally spawns its actor.
pub struct CompilerBuilder<B, J> {
    backend: B,
    project: J,
    logger: Arc<dyn Logger>,
    terminator: Arc<dyn Terminator>,
    /// `None` follows the project's own settings
    settings: Option<BatchConfig>,
    root: Option<PathBuf>,
}

impl<B: Backend, J: Project> CompilerBuilder<B, J> {
    pub fn new(backend: B, project: J) -> Self {
        Self {
            backend,
            project,
            logger: Arc::new(ConsoleLogger),
            terminator: Arc::new(ProcessExit),
            settings: None,
            root: None,
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    /// Replace the fail-fast exit (defaults to exiting the process).
    pub fn with_terminator(mut self, terminator: Arc<dyn Terminator>) -> Self {
        self.terminator = terminator;
        self
    }

    /// Fixed batching settings, ignoring [`Project::batch_config`].
    pub fn with_settings(mut self, settings: BatchConfig) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Directory diagnostics are printed relative to (defaults to the
    /// current directory).
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Synchronous driver, for callers that schedule passes themselves.
    pub fn build(self) -> IncrementalCompiler<B, J> {
        let root = self
            .root
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_default();
        let reporter = DiagnosticReporter::new(root, Arc::clone(&self.logger), self.terminator);
        IncrementalCompiler::new(self.backend, self.project, self.logger, reporter, self.settings)
    }

    /// Spawn the actor on the current tokio runtime.
    pub fn spawn(self) -> (Compiler<B::Unit>, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let actor = CompilerActor::new(rx, self.build());
        let handle = tokio::spawn(actor.run());
        (Compiler { tx }, handle)
    }
}
