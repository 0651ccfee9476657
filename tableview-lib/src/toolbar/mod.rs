//! Toolbar coordination: debounced search and column visibility.

mod columns;
mod debounce;
mod search;

pub use columns::*;
pub use debounce::*;
pub use search::*;
