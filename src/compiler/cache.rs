//! Program cache: the last compiled program, reused for source resolution.

use crate::backend::Program;

/// Holds at most one program. Dropped as a whole, never per file.
pub struct ProgramCache<P> {
    program: Option<P>,
}

impl<P> Default for ProgramCache<P> {
    fn default() -> Self {
        Self { program: None }
    }
}

impl<P: Program> ProgramCache<P> {
    pub fn program(&self) -> Option<&P> {
        self.program.as_ref()
    }

    /// Store `program` as the new baseline and return it.
    pub fn replace(&mut self, program: P) -> &P {
        self.program.insert(program)
    }

    /// Drop the cached program. Returns whether one was held.
    pub fn invalidate(&mut self) -> bool {
        self.program.take().is_some()
    }
}
