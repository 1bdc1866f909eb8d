//! Compiler Actor - owns the driver and runs one pass per quiet period.
//!
//! A pass runs on the blocking pool with the driver moved into it; the
//! actor waits for it before reading the channel again, so passes never
//! overlap and requests arriving mid-pass wait for the next one.

use tokio::sync::mpsc;

use super::debouncer::Debouncer;
use super::messages::CompilerMsg;
use crate::backend::Backend;
use crate::compiler::IncrementalCompiler;
use crate::project::Project;
use crate::utils::plural::plural_count;

pub struct CompilerActor<B: Backend, J: Project> {
    rx: mpsc::UnboundedReceiver<CompilerMsg<B::Unit>>,
    compiler: IncrementalCompiler<B, J>,
    debouncer: Debouncer,
}

impl<B: Backend, J: Project> CompilerActor<B, J> {
    pub fn new(
        rx: mpsc::UnboundedReceiver<CompilerMsg<B::Unit>>,
        compiler: IncrementalCompiler<B, J>,
    ) -> Self {
        let debouncer = Debouncer::new(compiler.batch_config().quiet_period());
        Self {
            rx,
            compiler,
            debouncer,
        }
    }

    /// Main event loop. Returns once every handle is dropped or a
    /// shutdown arrives, after answering anything still queued.
    pub async fn run(self) {
        // Extract fields: the driver moves in and out of the blocking pool
        let Self {
            mut rx,
            mut compiler,
            mut debouncer,
        } = self;

        loop {
            tokio::select! {
                biased; // New requests take priority over an expiring timer

                msg = rx.recv() => match msg {
                    Some(CompilerMsg::Compile(request)) => {
                        crate::debug!("compile"; "queued {}", request.file.original_path.display());
                        compiler.enqueue(request);
                        debouncer.touch();
                    }
                    Some(CompilerMsg::Shutdown) => {
                        crate::debug!("compile"; "shutting down");
                        break;
                    }
                    None => break,
                },

                _ = tokio::time::sleep(debouncer.sleep_duration()), if debouncer.is_armed() => {
                    if debouncer.take_if_ready() {
                        let Some(returned) = run_pass(compiler).await else {
                            return;
                        };
                        compiler = returned;
                        // `[batch]` may have changed with the project
                        debouncer.set_quiet_period(compiler.batch_config().quiet_period());
                    }
                }
            }
        }

        if compiler.queued() > 0 {
            run_pass(compiler).await;
        }
    }
}

/// Run one pass on the blocking pool and hand the driver back.
///
/// `None` if the pass panicked; its queued requests are dropped with it.
async fn run_pass<B: Backend, J: Project>(
    mut compiler: IncrementalCompiler<B, J>,
) -> Option<IncrementalCompiler<B, J>> {
    crate::debug!("compile"; "pass for {}", plural_count(compiler.queued(), "request"));

    let joined = tokio::task::spawn_blocking(move || {
        let result = compiler.run_pass();
        (compiler, result)
    })
    .await;

    match joined {
        Ok((compiler, result)) => {
            match result {
                Ok(summary) => crate::debug!(
                    "compile";
                    "delivered {}, {} from cache",
                    plural_count(summary.delivered, "file"),
                    plural_count(summary.cache_hits, "source unit")
                ),
                // Already reported through the logger
                Err(err) => crate::debug!("compile"; "pass failed: {}", err),
            }
            Some(compiler)
        }
        Err(err) => {
            crate::log!("error"; "compile pass panicked: {}", err);
            None
        }
    }
}
