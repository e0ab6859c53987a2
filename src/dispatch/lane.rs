use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use dashmap::DashSet;
use futures::FutureExt;
use lazy_static::lazy_static;
use nanoid::nanoid;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::error;
use tracing::trace;
use tracing::warn;

use crate::deliver;
use crate::DispatchConfig;
use crate::ListenerError;
use crate::StreamError;
use crate::StreamEvent;
use crate::StreamListener;
use crate::TransportError;
use crate::LISTENER_FAILURES;
use crate::STREAM_EVENTS_DISPATCHED;

lazy_static! {
    /// Ids of dispatch lanes whose worker task is still alive.
    pub static ref ACTIVE_LANES: DashSet<String> = DashSet::new();
}

/// One unit of work for a lane: an event to deliver, or a delivery failure to
/// report through the catch-all.
#[derive(Debug)]
pub(crate) enum DispatchTask {
    Deliver(StreamEvent),
    Report(StreamError),
}

/// Ordered asynchronous execution gate for one stream.
///
/// All tasks execute on a single spawned worker in submission order, so
/// listener callbacks from one stream never overlap and observe events in
/// wire order. The worker runs on a different task than the stream reader;
/// a slow callback delays this queue, not the socket.
pub(crate) struct DispatchLane {
    id: String,
    task_tx: Option<mpsc::UnboundedSender<DispatchTask>>,
    cancel: CancellationToken,
    worker: Option<JoinHandle<()>>,
}

impl DispatchLane {
    pub(crate) fn spawn(
        listener: Arc<dyn StreamListener>,
        config: &DispatchConfig,
    ) -> Self {
        let id = nanoid!();
        let (task_tx, task_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        ACTIVE_LANES.insert(id.clone());
        let worker = tokio::spawn(run_worker(
            id.clone(),
            listener,
            task_rx,
            cancel.clone(),
            config.warn_queue_depth,
        ));

        DispatchLane {
            id,
            task_tx: Some(task_tx),
            cancel,
            worker: Some(worker),
        }
    }

    pub(crate) fn id(&self) -> &str {
        &self.id
    }

    /// Enqueues a task for asynchronous execution and returns immediately.
    /// Fails only if the lane has already been shut down.
    pub(crate) fn submit(
        &self,
        task: DispatchTask,
    ) -> std::result::Result<(), TransportError> {
        let tx = self.task_tx.as_ref().ok_or(TransportError::LaneClosed)?;
        tx.send(task).map_err(|_| TransportError::LaneClosed)
    }

    /// Closes the intake and waits for every already-queued task to finish.
    pub(crate) async fn drain(&mut self) -> std::result::Result<(), TransportError> {
        debug!("[lane:{}] drain requested", self.id);
        // Dropping the sender lets the worker run the queue dry and exit.
        self.task_tx.take();
        self.join_worker().await
    }

    /// Cancels the worker, discarding queued tasks. The task executing at the
    /// moment of cancellation (if any) finishes before this returns; no new
    /// one begins afterwards.
    pub(crate) async fn abort(&mut self) -> std::result::Result<(), TransportError> {
        debug!("[lane:{}] abort requested", self.id);
        self.task_tx.take();
        self.cancel.cancel();
        self.join_worker().await
    }

    async fn join_worker(&mut self) -> std::result::Result<(), TransportError> {
        if let Some(worker) = self.worker.take() {
            worker.await?;
        }
        Ok(())
    }
}

impl Drop for DispatchLane {
    fn drop(&mut self) {
        // A lane dropped without drain()/abort() must not leak its worker.
        self.cancel.cancel();
    }
}

async fn run_worker(
    id: String,
    listener: Arc<dyn StreamListener>,
    mut task_rx: mpsc::UnboundedReceiver<DispatchTask>,
    cancel: CancellationToken,
    warn_queue_depth: usize,
) {
    debug!("[lane:{}] worker started", id);
    loop {
        tokio::select! {
            // Use biased to ensure abort wins over a loaded queue
            biased;
            _ = cancel.cancelled() => {
                warn!("[lane:{}] aborted with {} task(s) still queued", id, task_rx.len());
                break;
            }
            task = task_rx.recv() => {
                match task {
                    Some(task) => {
                        if task_rx.len() >= warn_queue_depth {
                            warn!("[lane:{}] listener falling behind: {} task(s) queued", id, task_rx.len());
                        }
                        run_task(&id, listener.as_ref(), task).await;
                    }
                    None => {
                        debug!("[lane:{}] intake closed, queue drained", id);
                        break;
                    }
                }
            }
        }
    }
    ACTIVE_LANES.remove(&id);
}

/// Executes one task at most once. A panic inside listener code is caught and
/// reported through `on_exception`; it never stops the lane.
async fn run_task(
    id: &str,
    listener: &dyn StreamListener,
    task: DispatchTask,
) {
    match task {
        DispatchTask::Deliver(event) => {
            let kind = event.kind();
            trace!("[lane:{}] delivering {} event", id, kind);
            match AssertUnwindSafe(deliver(listener, event)).catch_unwind().await {
                Ok(()) => {
                    STREAM_EVENTS_DISPATCHED.with_label_values(&[kind.as_str()]).inc();
                }
                Err(panic) => {
                    LISTENER_FAILURES.with_label_values(&[kind.as_str()]).inc();
                    let message = panic_message(panic);
                    error!("[lane:{}] {} callback panicked: {}", id, kind, message);
                    let error = StreamError::Listener(ListenerError::Panicked {
                        kind: kind.as_str(),
                        message,
                    });
                    report(id, listener, &error).await;
                }
            }
        }
        DispatchTask::Report(error) => {
            warn!("[lane:{}] reporting delivery failure: {}", id, error);
            report(id, listener, &error).await;
        }
    }
}

async fn report(
    id: &str,
    listener: &dyn StreamListener,
    error: &StreamError,
) {
    // The catch-all is itself listener code; a panic there is swallowed so it
    // cannot take the lane down with it.
    if AssertUnwindSafe(listener.on_exception(error)).catch_unwind().await.is_err() {
        error!("[lane:{}] on_exception itself panicked; dropping report", id);
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
