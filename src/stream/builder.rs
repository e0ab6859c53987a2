use std::sync::Arc;

use nanoid::nanoid;
use tokio::io::AsyncBufRead;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::run_reader;
use super::ReaderState;
use super::StreamHandle;
use crate::DispatchLane;
use crate::Error;
use crate::Result;
use crate::StreamConfig;
use crate::StreamListener;
use crate::OPEN_STREAMS;

/// Builder for opening a user stream over a transport the caller supplies.
///
/// The transport is anything line-readable: an HTTP response body wrapped in
/// a `BufReader`, a file of captured events, or an in-memory byte slice in
/// tests. Reconnection and backoff are the transport collaborator's concern;
/// once the source fails, the stream terminates and surfaces the error.
///
/// ```rust,no_run
/// # use std::sync::Arc;
/// # use chirpstream::{StreamListener, UserStreamBuilder};
/// # struct MyListener;
/// # #[async_trait::async_trait]
/// # impl StreamListener for MyListener {}
/// # async fn example(feed: tokio::io::BufReader<tokio::fs::File>) -> chirpstream::Result<()> {
/// let handle = UserStreamBuilder::new()
///     .listener(Arc::new(MyListener))
///     .open(feed)?;
/// handle.join().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct UserStreamBuilder {
    config: StreamConfig,
    listener: Option<Arc<dyn StreamListener>>,
}

impl UserStreamBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(
        mut self,
        config: StreamConfig,
    ) -> Self {
        self.config = config;
        self
    }

    pub fn listener(
        mut self,
        listener: Arc<dyn StreamListener>,
    ) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Opens the stream: spawns one dispatch lane and one reader loop for
    /// this connection. Must be called from within a tokio runtime.
    ///
    /// Streams opened separately are fully independent; no ordering holds
    /// across them.
    pub fn open<R>(
        self,
        source: R,
    ) -> Result<StreamHandle>
    where
        R: AsyncBufRead + Send + Unpin + 'static,
    {
        let listener = self
            .listener
            .ok_or_else(|| Error::Fatal("a stream listener is required".to_owned()))?;
        self.config.validate()?;

        let stream_id = nanoid!();
        let lane = DispatchLane::spawn(listener, &self.config.dispatch);
        let (state_tx, state_rx) = watch::channel(ReaderState::Idle);
        let drain = CancellationToken::new();
        let abort = CancellationToken::new();

        OPEN_STREAMS.inc();
        info!("[stream:{}] opened on lane {}", stream_id, lane.id());
        let reader = tokio::spawn(run_reader(
            stream_id.clone(),
            source,
            lane,
            state_tx,
            drain.clone(),
            abort.clone(),
        ));

        Ok(StreamHandle::new(stream_id, drain, abort, state_rx, reader))
    }
}
