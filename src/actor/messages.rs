//! Actor Message Definitions
//!
//! ```text
//! Compiler --Compile--> CompilerActor
//! Compiler --Shutdown--> CompilerActor (flush queue, then stop)
//! ```

use crate::compiler::CompileRequest;

/// Messages to Compiler Actor
#[derive(Debug)]
pub enum CompilerMsg<U> {
    /// Queue a request and restart the quiet period
    Compile(CompileRequest<U>),
    /// Answer whatever is queued, then stop
    Shutdown,
}
