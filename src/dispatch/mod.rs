mod lane;

pub(crate) use lane::*;
pub use lane::ACTIVE_LANES;
