use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::Result;
use crate::TransportError;

/// Lifecycle of one stream reader loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    Idle,
    Reading,
    EndOfStream,
    TransportError,
    Closed,
}

/// Control surface for one open stream, returned by
/// [`UserStreamBuilder::open`].
///
/// [`UserStreamBuilder::open`]: crate::UserStreamBuilder::open
pub struct StreamHandle {
    stream_id: String,
    drain: CancellationToken,
    abort: CancellationToken,
    state_rx: watch::Receiver<ReaderState>,
    reader: Mutex<Option<JoinHandle<Result<()>>>>,
}

impl StreamHandle {
    pub(crate) fn new(
        stream_id: String,
        drain: CancellationToken,
        abort: CancellationToken,
        state_rx: watch::Receiver<ReaderState>,
        reader: JoinHandle<Result<()>>,
    ) -> Self {
        StreamHandle {
            stream_id,
            drain,
            abort,
            state_rx,
            reader: Mutex::new(Some(reader)),
        }
    }

    pub fn id(&self) -> &str {
        &self.stream_id
    }

    pub fn state(&self) -> ReaderState {
        *self.state_rx.borrow()
    }

    /// Stops the reader loop and shuts the dispatch lane down.
    ///
    /// With `drain = true`, every already-submitted listener invocation
    /// completes before this returns. With `drain = false`, queued work is
    /// discarded and no new listener invocation begins after this returns.
    /// A second call is a no-op returning `Ok(())`.
    pub async fn close(
        &self,
        drain: bool,
    ) -> Result<()> {
        if drain {
            self.drain.cancel();
        } else {
            self.abort.cancel();
        }
        self.join().await
    }

    /// Awaits natural loop termination (clean end-of-stream or transport
    /// failure) and yields the transport outcome.
    pub async fn join(&self) -> Result<()> {
        let reader = self.reader.lock().take();
        match reader {
            Some(handle) => handle.await.map_err(TransportError::TaskFailed)?,
            None => Ok(()),
        }
    }
}
