//! File-system backed project.
//!
//! Reads `batchc.toml`, walks the include directories and, with
//! `watch = true`, keeps a `notify` watcher on the project root so that
//! quiet periods without file events skip the rescan entirely.
//!
//! Only the *shape* of the project counts as a change: the manifest content
//! and the list of source files, fingerprinted with blake3. Editing an
//! existing file is not a change here; requested files are always re-read.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};

use super::scan::collect_sources;
use super::{FsEvent, Project, ProjectConfig, ProjectError};
use crate::config::{BatchConfig, MANIFEST_NAME, ProjectManifest};
use crate::utils::path::{is_temp_file, normalize_path};

/// Project described by a `batchc.toml` manifest.
pub struct WatchedProject {
    manifest_path: PathBuf,
    /// Directory containing the manifest
    root: PathBuf,
    /// `None` when `watch = false`: every poll rescans
    watch: Option<Watch>,
    resolved: ProjectConfig,
    batch: BatchConfig,
    fingerprint: Option<blake3::Hash>,
    /// First poll always reports a change
    reported: bool,
}

struct Watch {
    rx: Receiver<notify::Result<notify::Event>>,
    /// Watcher handle (must be kept alive)
    _watcher: RecommendedWatcher,
}

impl Watch {
    fn start(root: &Path) -> Result<Self, ProjectError> {
        // Sync channel: notify callbacks run on its own thread
        let (tx, rx) = std::sync::mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(root, RecursiveMode::Recursive)?;
        Ok(Self {
            rx,
            _watcher: watcher,
        })
    }
}

impl WatchedProject {
    /// Open the project whose manifest is at `manifest_path`.
    ///
    /// Manifest problems are not errors here, they show up in
    /// [`ProjectConfig::errors`]. Fails only if the watcher cannot start.
    pub fn open(manifest_path: impl AsRef<Path>) -> Result<Self, ProjectError> {
        let manifest_path = normalize_path(manifest_path.as_ref());
        let root = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        let (manifest, _) = ProjectManifest::load(&manifest_path);
        let watch = if manifest.project.watch {
            Some(Watch::start(&root)?)
        } else {
            None
        };

        let mut project = Self {
            manifest_path,
            root,
            watch,
            resolved: ProjectConfig::default(),
            batch: manifest.batch,
            fingerprint: None,
            reported: false,
        };
        project.rescan();
        Ok(project)
    }

    /// Open `batchc.toml` in `dir`.
    pub fn open_dir(dir: impl AsRef<Path>) -> Result<Self, ProjectError> {
        Self::open(dir.as_ref().join(MANIFEST_NAME))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Re-read manifest and file list; `Changed` if the fingerprint moved.
    fn rescan(&mut self) -> FsEvent {
        let (manifest, mut errors) = ProjectManifest::load(&self.manifest_path);
        let (file_names, scan_errors) = collect_sources(&self.root, &manifest.project);
        errors.extend(scan_errors);

        let fingerprint = fingerprint(&self.manifest_path, &file_names);
        crate::debug!("watch"; "resolved {} files", file_names.len());

        self.batch = manifest.batch;
        self.resolved = ProjectConfig {
            file_names,
            options: manifest.compiler_options,
            errors,
        };

        if self.fingerprint.replace(fingerprint) == Some(fingerprint) {
            FsEvent::Unchanged
        } else {
            FsEvent::Changed
        }
    }

    /// Drain pending watcher events. Without a watcher, always `true`.
    fn drain_events(&self) -> bool {
        let Some(watch) = &self.watch else {
            return true;
        };

        let mut relevant = false;
        while let Ok(result) = watch.rx.try_recv() {
            match result {
                Ok(event) => relevant |= is_relevant(&event),
                Err(e) => {
                    crate::log!("watch"; "notify error: {}", e);
                    relevant = true;
                }
            }
        }
        relevant
    }
}

impl Project for WatchedProject {
    fn handle_file_system_event(&mut self) -> FsEvent {
        let relevant = self.drain_events();
        if self.reported && !relevant {
            return FsEvent::Unchanged;
        }

        let event = self.rescan();
        if !std::mem::replace(&mut self.reported, true) {
            return FsEvent::Changed;
        }
        if event.is_changed() {
            crate::debug!("watch"; "project file set changed");
        }
        event
    }

    fn config(&self) -> Result<ProjectConfig, ProjectError> {
        Ok(self.resolved.clone())
    }

    /// `[batch]` section of the last loaded manifest.
    fn batch_config(&self) -> Option<BatchConfig> {
        Some(self.batch.clone())
    }
}

/// Create/remove/content events on non-temp files.
fn is_relevant(event: &notify::Event) -> bool {
    use notify::EventKind;

    let kind_matters = match event.kind {
        EventKind::Create(_) | EventKind::Remove(_) => true,
        // Metadata-only changes (mtime/atime/chmod) are noise
        EventKind::Modify(modify) => !matches!(modify, notify::event::ModifyKind::Metadata(_)),
        _ => false,
    };
    kind_matters && event.paths.iter().any(|p| !is_temp_file(p))
}

/// Hash of manifest bytes plus the sorted source list.
fn fingerprint(manifest_path: &Path, file_names: &[PathBuf]) -> blake3::Hash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&fs::read(manifest_path).unwrap_or_default());
    for path in file_names {
        hasher.update(path.as_os_str().as_encoded_bytes());
        hasher.update(b"\0");
    }
    hasher.finalize()
}
