//! Domain entities carried by stream events.
//!
//! Every entity is deserialized from the raw JSON of its event with serde's
//! default leniency: unknown fields are ignored so that upstream vocabulary
//! growth never fails the decode of an existing field set.

mod direct_message;
mod notice;
mod status;
mod user;
mod user_list;

pub use direct_message::*;
pub use notice::*;
pub use status::*;
pub use user::*;
pub use user_list::*;
