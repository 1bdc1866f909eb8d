//! Path utilities.
//!
//! - [`fs`]: Filesystem path normalization (`normalize_path`) and editor
//!   artifact detection (`is_temp_file`)

pub mod fs;

pub use fs::{is_temp_file, normalize_path};
