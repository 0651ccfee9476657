//! Error types

mod action;
mod capability;

pub use action::*;
pub use capability::*;

/// Top-level error for fallible table operations.
///
/// The pure transforms (sort, group, filter apply) never fail; only capability
/// checks, configuration parsing and external async actions can.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// A feature was requested that the supplied inputs do not enable.
    #[error(transparent)]
    Capability(#[from] CapabilityError),

    /// An external action (confirmation, bulk action) rejected.
    #[error(transparent)]
    Action(#[from] ActionError),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Failed to (de)serialize table data or configuration.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TableError {
    /// Creates a new configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Returns `true` if this is a capability gate rather than a failure.
    pub fn is_capability(&self) -> bool {
        matches!(self, Self::Capability(_))
    }
}
