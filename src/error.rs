//! Errors delivered to compile requesters.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::project::ProjectError;

/// Why a compile request did not produce a [`CompiledFile`](crate::CompiledFile).
///
/// Cloneable: one failed pass fans the same error out to every queued request.
#[derive(Debug, Clone, Error)]
pub enum CompileError {
    /// The compiled program has no source unit for a requested file.
    #[error(
        "No source found for {}!\nIs there a mismatch between the compiler options and the requested files?",
        path.display()
    )]
    MissingSource { path: PathBuf },

    /// Dispatch stopped at an earlier request whose source was missing.
    #[error("compilation aborted: no source found for {}", missing.display())]
    Aborted { missing: PathBuf },

    /// Fail-fast triggered: diagnostics were reported and outputs skipped.
    #[error("{count} diagnostic(s) present, outputs skipped")]
    DiagnosticsPresent { count: usize },

    /// The project provider could not produce a configuration.
    #[error("project error: {0}")]
    Project(Arc<ProjectError>),

    /// The compiler actor has stopped and accepts no more requests.
    #[error("compiler is no longer running")]
    Closed,

    /// The request was discarded without a result.
    #[error("compile request dropped without a result")]
    Dropped,
}

impl From<ProjectError> for CompileError {
    fn from(err: ProjectError) -> Self {
        Self::Project(Arc::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_source_names_path() {
        let err = CompileError::MissingSource {
            path: PathBuf::from("/project/src/missing.ts"),
        };
        let display = err.to_string();
        assert!(display.contains("/project/src/missing.ts"));
        assert!(display.contains("mismatch"));
    }

    #[test]
    fn test_project_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: CompileError = ProjectError::Io(PathBuf::from("batchc.toml"), io).into();
        assert!(matches!(err, CompileError::Project(_)));
        assert!(err.to_string().contains("batchc.toml"));
    }
}
