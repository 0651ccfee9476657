//! Capability errors

/// A feature that the current inputs do not enable.
///
/// These are not runtime failures: the caller is expected to render an inert,
/// explanatory state instead of the feature.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CapabilityError {
    /// No filter metadata was supplied, so the advanced filter builder is unavailable.
    #[error("No filter metadata available for this table")]
    NoFilterMetadata,

    /// A filter referenced a column the metadata does not declare.
    #[error("Column '{0}' is not filterable")]
    UnknownFilterColumn(String),
}

impl CapabilityError {
    /// Creates a new unknown filter column error.
    pub fn unknown_column(column: impl Into<String>) -> Self {
        Self::UnknownFilterColumn(column.into())
    }
}
