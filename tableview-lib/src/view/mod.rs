//! View renderer
//!
//! Projects the processed row set into one of the view modes.

mod cell;
mod mode;
mod projection;

pub use cell::*;
pub use mode::*;
pub use projection::*;
