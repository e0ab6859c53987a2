mod config;
mod dispatch;
mod errors;
mod event;
mod listener;
mod metrics;
mod model;
mod stream;

pub use config::*;
pub use dispatch::*;
pub use errors::*;
pub use event::*;
pub use listener::*;
pub use metrics::*;
pub use model::*;
pub use stream::*;

//-----------------------------------------------------------
// Test utils

#[cfg(test)]
pub mod test_utils;
