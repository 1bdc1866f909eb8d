//! Actor System for Request Batching
//!
//! Callers talk to a cloneable [`Compiler`] handle; a single
//! [`CompilerActor`] task owns the [`IncrementalCompiler`](crate::IncrementalCompiler)
//! and decides when passes run:
//!
//! ```text
//! Compiler::compile ──CompilerMsg──> CompilerActor ──(quiet period)──> run_pass
//! Compiler::compile ──CompilerMsg──┘   (debouncer)
//! ```
//!
//! # Module Structure
//!
//! - `messages` - Message types sent to the actor
//! - `debouncer` - Quiet-period timing
//! - `compiler` - The actor event loop
//! - `handle` - Public handle and builder

mod compiler;
mod debouncer;
mod handle;
mod messages;


pub use compiler::CompilerActor;
pub use handle::{Compiler, CompilerBuilder};
pub use messages::CompilerMsg;
