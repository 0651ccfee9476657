//! External action errors

/// Error reported by an external async action (bulk delete, export, ...).
///
/// The engine never retries or swallows these; they are handed back to the
/// caller unchanged.
#[derive(Debug, Clone)]
pub struct ActionError {
    /// Human-readable error message.
    pub message: String,
    /// Optional error code from the backend.
    pub code: Option<String>,
}

impl ActionError {
    /// Creates a new action error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    /// Creates a new action error with an error code.
    pub fn with_code(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: Some(code.into()),
        }
    }
}

impl std::fmt::Display for ActionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(code) = &self.code {
            write!(f, "{} ({})", self.message, code)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for ActionError {}

impl From<String> for ActionError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for ActionError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}
