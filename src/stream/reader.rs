use tokio::io::AsyncBufRead;
use tokio::io::AsyncBufReadExt;
use tokio::sync::watch;
use tokio_stream::wrappers::LinesStream;
use tokio_stream::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;

use super::ReaderState;
use crate::classify;
use crate::decode;
use crate::DispatchLane;
use crate::DispatchTask;
use crate::Error;
use crate::RawEvent;
use crate::Result;
use crate::StreamError;
use crate::TransportError;
use crate::DECODE_ERRORS;
use crate::OPEN_STREAMS;
use crate::PARSE_ERRORS;
use crate::UNRECOGNIZED_EVENTS;

/// The per-stream reader loop: pulls one line at a time off the transport,
/// classifies and decodes it, and submits the resulting listener invocation
/// to the dispatch lane.
///
/// Runs until clean end-of-stream (drains the lane), transport failure
/// (aborts the lane, surfaces the error), or a close request from the
/// [`StreamHandle`]. Nothing that happens at decode time or inside listener
/// code terminates this loop.
///
/// [`StreamHandle`]: super::StreamHandle
pub(crate) async fn run_reader<R>(
    stream_id: String,
    source: R,
    mut lane: DispatchLane,
    state_tx: watch::Sender<ReaderState>,
    drain: CancellationToken,
    abort: CancellationToken,
) -> Result<()>
where
    R: AsyncBufRead + Send + Unpin + 'static,
{
    let mut lines = LinesStream::new(source.lines());
    let _ = state_tx.send(ReaderState::Reading);
    info!("[stream:{}] reading", stream_id);

    let mut line_no: u64 = 0;
    let outcome: Result<()> = loop {
        tokio::select! {
            // Use biased to ensure an abort request wins over pending input
            biased;
            _ = abort.cancelled() => {
                info!("[stream:{}] close requested, dropping queued work", stream_id);
                break lane.abort().await.map_err(Error::from);
            }
            _ = drain.cancelled() => {
                info!("[stream:{}] close requested, draining queued work", stream_id);
                break lane.drain().await.map_err(Error::from);
            }
            next = lines.next() => match next {
                Some(Ok(line)) => {
                    line_no += 1;
                    if let Err(e) = handle_line(&stream_id, line_no, line.trim(), &lane) {
                        error!("[stream:{}] dispatch lane lost: {}", stream_id, e);
                        let _ = state_tx.send(ReaderState::TransportError);
                        if let Err(shutdown) = lane.abort().await {
                            warn!("[stream:{}] lane abort failed during teardown: {}", stream_id, shutdown);
                        }
                        break Err(e.into());
                    }
                }
                None => {
                    info!("[stream:{}] end of stream after {} line(s)", stream_id, line_no);
                    let _ = state_tx.send(ReaderState::EndOfStream);
                    break lane.drain().await.map_err(Error::from);
                }
                Some(Err(e)) => {
                    error!("[stream:{}] transport failure: {}", stream_id, e);
                    let _ = state_tx.send(ReaderState::TransportError);
                    if let Err(shutdown) = lane.abort().await {
                        warn!("[stream:{}] lane abort failed during teardown: {}", stream_id, shutdown);
                    }
                    break Err(TransportError::Io(e).into());
                }
            }
        }
    };

    let _ = state_tx.send(ReaderState::Closed);
    OPEN_STREAMS.dec();
    outcome
}

/// Processes one feed line. Only a dead dispatch lane is an error here:
/// malformed JSON is logged and skipped, decode failures are converted into
/// report tasks, unrecognized shapes are dropped by contract.
fn handle_line(
    stream_id: &str,
    line_no: u64,
    line: &str,
    lane: &DispatchLane,
) -> std::result::Result<(), TransportError> {
    // Keep-alive newlines arrive on idle streams
    if line.is_empty() {
        return Ok(());
    }

    let raw = match RawEvent::parse(line_no, line) {
        Ok(raw) => raw,
        Err(e) => {
            PARSE_ERRORS.inc();
            warn!("[stream:{}] skipping malformed line: {}", stream_id, e);
            return Ok(());
        }
    };

    let kind = classify(&raw);
    match decode(kind, &raw) {
        Ok(Some(event)) => lane.submit(DispatchTask::Deliver(event)),
        Ok(None) => {
            UNRECOGNIZED_EVENTS.inc();
            debug!(
                "[stream:{}] ignoring unrecognized event shape on line {}",
                stream_id, line_no
            );
            Ok(())
        }
        Err(e) => {
            DECODE_ERRORS.with_label_values(&[kind.as_str()]).inc();
            warn!(
                "[stream:{}] {} event on line {} failed to decode: {}",
                stream_id, kind, line_no, e
            );
            lane.submit(DispatchTask::Report(StreamError::Decode(e)))
        }
    }
}
