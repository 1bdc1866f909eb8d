//! Configuration section definitions.
//!
//! Each module corresponds to a section in `batchc.toml`:
//!
//! | Module    | TOML Section          | Purpose                              |
//! |-----------|-----------------------|--------------------------------------|
//! | `project` | `[project]`           | Which files make up the project      |
//! | `options` | `[compiler_options]`  | Options passed through to the backend |
//! | `batch`   | `[batch]`             | Quiet period and output capture      |

mod batch;
mod options;
mod project;

pub use batch::{BatchConfig, DEFAULT_QUIET_PERIOD_MS};
pub use options::CompilerOptions;
pub use project::ProjectSection;
