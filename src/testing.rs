//! In-memory backend, project and logger shared by the driver and actor tests.
//!
//! The fixture project lives under `/p`:
//!
//! ```text
//! /p/src/a.ts          -> /p/dist/a.js (+ .map)
//! /p/src/b.ts          -> /p/dist/b.js (+ .map)
//! /p/src/types.d.ts    (declaration only, nothing emitted)
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, mpsc};
use std::time::Duration;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::actor::CompilerBuilder;
use crate::backend::{Backend, BoxedHost, CompilerHost, Program, SourceUnit};
use crate::compiler::{CompileRequest, CompiledFile, IncrementalCompiler, InputFile};
use crate::config::{BatchConfig, CompilerOptions};
use crate::diagnostic::{Diagnostic, ExitStatus, Terminator};
use crate::error::CompileError;
use crate::logger::Logger;
use crate::project::{FsEvent, Project, ProjectConfig, ProjectError};

pub const ROOT: &str = "/p";

// ============================================================================
// Backend
// ============================================================================

#[derive(Debug)]
pub struct FakeUnit {
    pub path: PathBuf,
    pub text: String,
    /// Parse number, unique per `get_source_file` read from disk
    pub serial: usize,
}

impl SourceUnit for FakeUnit {
    fn file_name(&self) -> &Path {
        &self.path
    }

    fn is_declaration_file(&self) -> bool {
        self.path.to_string_lossy().ends_with(".d.ts")
    }
}

type Disk = Arc<Mutex<FxHashMap<PathBuf, String>>>;

/// Blocks the next `create_program` until released.
type Gate = Arc<Mutex<Option<mpsc::Receiver<()>>>>;

#[derive(Debug, Default)]
pub struct Counters {
    parses: AtomicUsize,
    programs: AtomicUsize,
    hosts: AtomicUsize,
}

impl Counters {
    pub fn parses(&self) -> usize {
        self.parses.load(Ordering::SeqCst)
    }

    pub fn programs(&self) -> usize {
        self.programs.load(Ordering::SeqCst)
    }

    pub fn hosts(&self) -> usize {
        self.hosts.load(Ordering::SeqCst)
    }
}

pub struct FakeHost {
    disk: Disk,
    counters: Arc<Counters>,
    written: Arc<Mutex<Vec<PathBuf>>>,
}

impl CompilerHost<FakeUnit> for FakeHost {
    fn get_source_file(&self, path: &Path) -> Option<Arc<FakeUnit>> {
        let text = self.disk.lock().get(path).cloned()?;
        let serial = self.counters.parses.fetch_add(1, Ordering::SeqCst) + 1;
        Some(Arc::new(FakeUnit {
            path: path.to_path_buf(),
            text,
            serial,
        }))
    }

    fn write_file(&self, path: &Path, _text: &str) {
        self.written.lock().push(path.to_path_buf());
    }
}

pub struct FakeProgram {
    units: Vec<Arc<FakeUnit>>,
    out_dir: PathBuf,
    source_map: bool,
}

impl Program for FakeProgram {
    type Unit = FakeUnit;

    fn get_source_file(&self, path: &Path) -> Option<Arc<FakeUnit>> {
        self.units.iter().find(|u| u.path == path).cloned()
    }

    fn emit(&self, host: &dyn CompilerHost<FakeUnit>) {
        for unit in self.units.iter().filter(|u| !u.is_declaration_file()) {
            let stem = unit.path.file_stem().unwrap().to_string_lossy();
            let output = self.out_dir.join(format!("{stem}.js"));
            host.write_file(&output, &format!("// emitted\n{}", unit.text));
            if self.source_map {
                let map = self.out_dir.join(format!("{stem}.js.map"));
                host.write_file(&map, &format!("{{\"file\":\"{stem}.js\"}}"));
            }
        }
    }
}

pub struct FakeBackend {
    disk: Disk,
    counters: Arc<Counters>,
    diagnostics: Arc<Mutex<Vec<Diagnostic>>>,
    written: Arc<Mutex<Vec<PathBuf>>>,
    gate: Gate,
}

impl Backend for FakeBackend {
    type Unit = FakeUnit;
    type Program = FakeProgram;

    fn name(&self) -> &str {
        "fake"
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn create_host(&self, _options: &CompilerOptions) -> BoxedHost<FakeUnit> {
        self.counters.hosts.fetch_add(1, Ordering::SeqCst);
        Box::new(FakeHost {
            disk: Arc::clone(&self.disk),
            counters: Arc::clone(&self.counters),
            written: Arc::clone(&self.written),
        })
    }

    fn create_program(
        &self,
        file_names: &[PathBuf],
        options: &CompilerOptions,
        host: &dyn CompilerHost<FakeUnit>,
    ) -> FakeProgram {
        self.counters.programs.fetch_add(1, Ordering::SeqCst);
        let gate = self.gate.lock().take();
        if let Some(gate) = gate {
            let _ = gate.recv_timeout(Duration::from_secs(5));
        }
        FakeProgram {
            units: file_names
                .iter()
                .filter_map(|path| host.get_source_file(path))
                .collect(),
            out_dir: options
                .out_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(ROOT).join("dist")),
            source_map: options.source_map,
        }
    }

    fn pre_emit_diagnostics(&self, _program: &FakeProgram) -> Vec<Diagnostic> {
        self.diagnostics.lock().clone()
    }
}

// ============================================================================
// Project
// ============================================================================

struct ProjectState {
    changed: bool,
    fail: bool,
    config: ProjectConfig,
    batch: Option<BatchConfig>,
}

pub struct FakeProject {
    state: Arc<Mutex<ProjectState>>,
}

impl Project for FakeProject {
    fn handle_file_system_event(&mut self) -> FsEvent {
        if std::mem::take(&mut self.state.lock().changed) {
            FsEvent::Changed
        } else {
            FsEvent::Unchanged
        }
    }

    fn config(&self) -> Result<ProjectConfig, ProjectError> {
        let state = self.state.lock();
        if state.fail {
            return Err(ProjectError::Io(
                PathBuf::from(ROOT).join("batchc.toml"),
                std::io::Error::other("disk gone"),
            ));
        }
        Ok(state.config.clone())
    }

    fn batch_config(&self) -> Option<BatchConfig> {
        self.state.lock().batch.clone()
    }
}

// ============================================================================
// Logger and terminator
// ============================================================================

#[derive(Debug, Default)]
pub struct MemoryLogger {
    infos: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl MemoryLogger {
    pub fn infos(&self) -> Vec<String> {
        self.infos.lock().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().clone()
    }
}

impl Logger for MemoryLogger {
    fn info(&self, message: &str) {
        self.infos.lock().push(message.to_owned());
    }

    fn error(&self, message: &str) {
        self.errors.lock().push(message.to_owned());
    }
}

/// Records exit requests instead of exiting.
#[derive(Debug, Default)]
pub struct ExitRecorder {
    statuses: Mutex<Vec<ExitStatus>>,
}

impl ExitRecorder {
    pub fn statuses(&self) -> Vec<ExitStatus> {
        self.statuses.lock().clone()
    }
}

impl Terminator for ExitRecorder {
    fn terminate(&self, status: ExitStatus) {
        self.statuses.lock().push(status);
    }
}

// ============================================================================
// Fixture
// ============================================================================

pub struct Fixture {
    disk: Disk,
    pub counters: Arc<Counters>,
    diagnostics: Arc<Mutex<Vec<Diagnostic>>>,
    written: Arc<Mutex<Vec<PathBuf>>>,
    gate: Gate,
    project: Arc<Mutex<ProjectState>>,
    pub logger: Arc<MemoryLogger>,
    pub exits: Arc<ExitRecorder>,
}

impl Fixture {
    pub fn new() -> Self {
        let files = [
            ("src/a.ts", "export const a: number = 1;"),
            ("src/b.ts", "export const b: string = 'b';"),
            ("src/types.d.ts", "declare const t: number;"),
        ];
        let disk: FxHashMap<_, _> = files
            .iter()
            .map(|(path, text)| (src(path), text.to_string()))
            .collect();

        let config = ProjectConfig {
            file_names: files.iter().map(|(path, _)| src(path)).collect(),
            options: CompilerOptions {
                out_dir: Some(src("dist")),
                source_map: true,
                ..Default::default()
            },
            errors: Vec::new(),
        };

        Self {
            disk: Arc::new(Mutex::new(disk)),
            counters: Arc::default(),
            diagnostics: Arc::default(),
            written: Arc::default(),
            gate: Arc::default(),
            project: Arc::new(Mutex::new(ProjectState {
                changed: true,
                fail: false,
                config,
                batch: None,
            })),
            logger: Arc::default(),
            exits: Arc::default(),
        }
    }

    pub fn backend(&self) -> FakeBackend {
        FakeBackend {
            disk: Arc::clone(&self.disk),
            counters: Arc::clone(&self.counters),
            diagnostics: Arc::clone(&self.diagnostics),
            written: Arc::clone(&self.written),
            gate: Arc::clone(&self.gate),
        }
    }

    pub fn project(&self) -> FakeProject {
        FakeProject {
            state: Arc::clone(&self.project),
        }
    }

    pub fn builder(&self) -> CompilerBuilder<FakeBackend, FakeProject> {
        CompilerBuilder::new(self.backend(), self.project())
            .with_logger(self.logger.clone())
            .with_terminator(self.exits.clone())
            .with_root(ROOT)
    }

    pub fn compiler(&self) -> IncrementalCompiler<FakeBackend, FakeProject> {
        self.builder().build()
    }

    /// Change a file's content without touching the project's file set.
    pub fn edit(&self, rel: &str, text: &str) {
        self.disk.lock().insert(src(rel), text.to_owned());
    }

    /// Add a new source file to disk and to the project.
    pub fn add_file(&self, rel: &str, text: &str) {
        self.edit(rel, text);
        let mut state = self.project.lock();
        state.config.file_names.push(src(rel));
        state.changed = true;
    }

    pub fn signal_change(&self) {
        self.project.lock().changed = true;
    }

    pub fn set_project_failing(&self, failing: bool) {
        self.project.lock().fail = failing;
    }

    /// `[batch]` settings the project reports from now on.
    pub fn set_batch(&self, batch: BatchConfig) {
        self.project.lock().batch = Some(batch);
    }

    /// Hold the next program build until the returned sender fires or drops.
    pub fn hold_next_program(&self) -> mpsc::Sender<()> {
        let (tx, rx) = mpsc::channel();
        *self.gate.lock() = Some(rx);
        tx
    }

    pub fn push_config_error(&self, diagnostic: Diagnostic) {
        self.project.lock().config.errors.push(diagnostic);
    }

    pub fn set_no_emit_on_error(&self, enabled: bool) {
        self.project.lock().config.options.no_emit_on_error = enabled;
    }

    pub fn push_diagnostic(&self, diagnostic: Diagnostic) {
        self.diagnostics.lock().push(diagnostic);
    }

    /// Paths the backend's own host was asked to write.
    pub fn written(&self) -> Vec<PathBuf> {
        self.written.lock().clone()
    }
}

/// Absolute path under the fixture root.
pub fn src(rel: &str) -> PathBuf {
    PathBuf::from(ROOT).join(rel)
}

/// Request for `src/<name>.ts`, output at `dist/<name>.js`.
pub fn input(name: &str) -> InputFile {
    InputFile::new(src(&format!("dist/{name}.js")), src(&format!("src/{name}.ts")))
}

pub type Results = Arc<Mutex<Vec<(PathBuf, Result<CompiledFile<FakeUnit>, CompileError>)>>>;

/// Request whose result is pushed onto `results`.
pub fn collect(file: InputFile, results: &Results) -> CompileRequest<FakeUnit> {
    let results = Arc::clone(results);
    let path = file.original_path.clone();
    CompileRequest::new(file, move |result| results.lock().push((path, result)))
}
