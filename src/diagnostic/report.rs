//! Diagnostic reporting with fail-fast policy.

use std::path::PathBuf;
use std::sync::Arc;

use super::Diagnostic;
use crate::config::CompilerOptions;
use crate::error::CompileError;
use crate::logger::Logger;
use crate::utils::plural::plural_count;

/// Process exit conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    /// Diagnostics were reported and no output was delivered.
    DiagnosticsPresentOutputsSkipped,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::DiagnosticsPresentOutputsSkipped => 1,
        }
    }
}

/// What happens when fail-fast fires.
pub trait Terminator: Send + Sync {
    fn terminate(&self, status: ExitStatus);
}

/// Exits the process with the status code.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExit;

impl Terminator for ProcessExit {
    fn terminate(&self, status: ExitStatus) {
        std::process::exit(status.code());
    }
}

impl<F> Terminator for F
where
    F: Fn(ExitStatus) + Send + Sync,
{
    fn terminate(&self, status: ExitStatus) {
        self(status)
    }
}

/// Formats diagnostics onto the logger's error channel.
pub struct DiagnosticReporter {
    /// File names are printed relative to this directory
    root: PathBuf,
    logger: Arc<dyn Logger>,
    terminator: Arc<dyn Terminator>,
}

impl DiagnosticReporter {
    pub fn new(root: PathBuf, logger: Arc<dyn Logger>, terminator: Arc<dyn Terminator>) -> Self {
        Self {
            root,
            logger,
            terminator,
        }
    }

    /// Log every diagnostic, then apply `no_emit_on_error`.
    ///
    /// Returns `Err(DiagnosticsPresent)` when fail-fast fired and the
    /// terminator returned instead of exiting.
    pub fn report(
        &self,
        diagnostics: &[Diagnostic],
        options: &CompilerOptions,
    ) -> Result<(), CompileError> {
        if diagnostics.is_empty() {
            return Ok(());
        }

        for diagnostic in diagnostics {
            self.logger.error(&diagnostic.format(&self.root));
        }

        if options.no_emit_on_error {
            crate::debug!("compile"; "fail-fast on {}", plural_count(diagnostics.len(), "diagnostic"));
            self.terminator
                .terminate(ExitStatus::DiagnosticsPresentOutputsSkipped);
            return Err(CompileError::DiagnosticsPresent {
                count: diagnostics.len(),
            });
        }

        Ok(())
    }
}
