//! Data model types

mod column;
mod metadata;
mod row;
pub mod value;

pub use column::*;
pub use metadata::*;
pub use row::*;
