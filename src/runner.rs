use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;

use crate::capture::FrameSource;
use crate::pipeline::Pipeline;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("run loop task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Copy)]
enum RunState {
    Initializing,
    Running,
    StopRequested,
    Stopped,
}

/// Drives the pipeline: a blocking run loop pulls frames and computes, while
/// a stop listener waits for a cancellation trigger. The two tasks share one
/// piece of mutable state, the stop flag; the listener stores with release
/// ordering and the loop reads with acquire at the top of each iteration.
pub struct Runner {
    pipeline: Pipeline,
    source: Box<dyn FrameSource>,
    stop: Arc<AtomicBool>,
}

impl Runner {
    pub fn new(pipeline: Pipeline, source: Box<dyn FrameSource>) -> Self {
        Self {
            pipeline,
            source,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Frame loop. Blocks until the stop flag is observed; a failed
    /// acquisition skips the iteration, an in-flight pass always completes.
    fn drive(&mut self) {
        tracing::info!(state = ?RunState::Running, "run loop entered");

        while !self.stop.load(Ordering::Acquire) {
            match self.source.next_frame() {
                Ok(frame) => self.pipeline.on_frame(&frame),
                Err(e) => {
                    tracing::warn!(error = %e, "frame acquisition failed, retrying");
                }
            }
        }

        self.source.close();
        tracing::info!("run loop exited");
    }

    /// Run until `trigger` completes. Joins both tasks, then stops every
    /// actor exactly once, in registration order.
    pub async fn run(
        mut self,
        trigger: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), RunError> {
        tracing::debug!(state = ?RunState::Initializing, "starting runner tasks");

        let stop = Arc::clone(&self.stop);
        let listener = tokio::spawn(async move {
            trigger.await;
            tracing::info!(state = ?RunState::StopRequested, "stop requested");
            stop.store(true, Ordering::Release);
        });

        let joined = tokio::task::spawn_blocking(move || {
            self.drive();
            self
        })
        .await;

        // The loop only exits once the flag is set, so the listener is done
        // by now unless the loop itself failed.
        listener.abort();

        let mut runner = joined?;
        runner.pipeline.shutdown();
        tracing::info!(state = ?RunState::Stopped, "pipeline stopped");

        Ok(())
    }
}
