//! Filter engine
//!
//! Active-filter list model, the metadata-driven filter builder, the
//! human-readable active-filter summary and local predicate evaluation for
//! tables that filter their own rows.

mod active;
mod builder;
mod operator;
mod predicate;
mod summary;
mod value;

pub use active::*;
pub use builder::*;
pub use operator::*;
pub use predicate::*;
pub use summary::*;
pub use value::*;
