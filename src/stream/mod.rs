mod builder;
mod handle;
mod reader;

pub use builder::*;
pub use handle::*;
pub(crate) use reader::*;
