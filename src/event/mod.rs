mod classifier;
mod decoder;
mod kind;
mod raw;
mod stream_event;

pub use classifier::*;
pub use decoder::*;
pub use kind::*;
pub use raw::*;
pub use stream_event::*;
