//! Source file collection for a `[project]` section.

use std::path::{Component, Path, PathBuf};

use jwalk::WalkDir;

use crate::config::{ProjectSection, codes};
use crate::diagnostic::Diagnostic;

/// Collect the project's source files, sorted and deduplicated.
///
/// Missing include directories and explicit files are reported as
/// diagnostics and skipped.
pub(super) fn collect_sources(root: &Path, section: &ProjectSection) -> (Vec<PathBuf>, Vec<Diagnostic>) {
    let mut files = Vec::new();
    let mut diagnostics = Vec::new();

    for include in &section.include {
        let dir = root.join(include);
        if !dir.is_dir() {
            diagnostics.push(Diagnostic::error(
                codes::MISSING_INCLUDE,
                format!("Include directory '{}' does not exist.", include.display()),
            ));
            continue;
        }

        files.extend(
            WalkDir::new(&dir)
                .into_iter()
                .filter_map(Result::ok)
                .filter(|e| e.file_type().is_file())
                .map(|e| e.path())
                .filter(|path| is_source(path, &dir, section)),
        );
    }

    for file in &section.files {
        let path = root.join(file);
        if path.is_file() {
            files.push(path);
        } else {
            diagnostics.push(Diagnostic::error(
                codes::MISSING_FILE,
                format!("File '{}' not found.", file.display()),
            ));
        }
    }

    files.sort();
    files.dedup();
    (files, diagnostics)
}

/// Matching extension and no excluded directory between `dir` and the file.
fn is_source(path: &Path, dir: &Path, section: &ProjectSection) -> bool {
    let matches = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| section.matches_extension(ext));
    if !matches {
        return false;
    }

    let relative = path.strip_prefix(dir).unwrap_or(path);
    !relative.components().any(|c| match c {
        Component::Normal(name) => name.to_str().is_some_and(|n| section.is_excluded(n)),
        _ => false,
    })
}
