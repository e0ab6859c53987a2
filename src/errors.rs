//! Stream Processing Error Hierarchy
//!
//! Defines the error taxonomy for user-stream consumption, split by what each
//! failure means for the stream: recoverable delivery-time failures are
//! reported through the listener's catch-all, only transport failures
//! terminate a stream.

use std::io;

use config::ConfigError;
use tokio::task::JoinError;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Connection-level failures, fatal to the current stream
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Configuration validation failures
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Recoverable delivery-time failures (also surfaced via `on_exception`)
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// Unrecoverable failures requiring the caller's attention
    #[error("Fatal error: {0}")]
    Fatal(String),
}

/// The delivery-failure subset handed to [`StreamListener::on_exception`].
///
/// Nothing in this enum terminates a stream: the reader loop converts each of
/// these into a reported event and moves on to the next line. Malformed JSON
/// lines never reach the catch-all; the reader logs and skips them with a
/// [`ParseError`] that stays internal.
///
/// [`StreamListener::on_exception`]: crate::StreamListener::on_exception
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// Recognized event kind with a corrupt or partial payload
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Failure raised inside a listener callback
    #[error(transparent)]
    Listener(#[from] ListenerError),
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// JSON syntax error on one feed line
    #[error("Malformed JSON on line {line}: {source}")]
    MalformedLine {
        line: u64,
        #[source]
        source: serde_json::Error,
    },

    /// Syntactically valid JSON that is not an object
    #[error("Event on line {line} is not a JSON object")]
    NotAnObject { line: u64 },
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// A recognized event kind is missing a field its callback requires
    #[error("{kind} event is missing required field `{field}`")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },

    /// A required field exists but is not an integer id
    #[error("{kind} event field `{field}` is not an integer")]
    InvalidId {
        kind: &'static str,
        field: &'static str,
    },

    /// An embedded entity failed to deserialize
    #[error("{kind} event field `{field}` failed to deserialize: {source}")]
    InvalidEntity {
        kind: &'static str,
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    /// A callback panicked; the dispatch lane caught it and keeps running
    #[error("Listener callback for {kind} event panicked: {message}")]
    Panicked {
        kind: &'static str,
        message: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// I/O failure on the feed connection
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The dispatch lane went away underneath the reader
    #[error("Dispatch lane closed")]
    LaneClosed,

    /// A background task panicked or was cancelled
    #[error("Background task failed: {0}")]
    TaskFailed(#[from] JoinError),
}

// ============== Conversion Implementations ============== //
impl From<DecodeError> for Error {
    fn from(e: DecodeError) -> Self {
        Error::Stream(StreamError::Decode(e))
    }
}

impl From<ListenerError> for Error {
    fn from(e: ListenerError) -> Self {
        Error::Stream(StreamError::Listener(e))
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Transport(TransportError::Io(e))
    }
}

impl From<JoinError> for Error {
    fn from(e: JoinError) -> Self {
        Error::Transport(TransportError::TaskFailed(e))
    }
}
