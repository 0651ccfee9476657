//! Outbound intents and external actions
//!
//! The engine never performs row-level work itself. Clicks, edits, deletes
//! and pagination are forwarded through [`TableEvents`]; bulk actions that
//! need confirmation and I/O go through [`BulkActionHandler`].

use async_trait::async_trait;

use crate::error::ActionError;

/// Receiver for table intents. Every method defaults to a no-op, so callers
/// implement only what their page supports.
pub trait TableEvents: Send + Sync {
    fn on_row_click(&self, _id: &str) {}

    fn on_edit(&self, _id: &str) {}

    fn on_delete(&self, _id: &str) {}

    /// The bulk-action affordance was used with these selected ids.
    fn on_bulk_action(&self, _ids: &[String]) {}

    fn on_add_click(&self) {}

    fn go_to_next_page(&self) {}

    fn go_to_previous_page(&self) {}

    fn set_page(&self, _page: usize) {}

    /// The user asked to refetch after a data error.
    fn retry(&self) {}
}

/// Events sink that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEvents;

impl TableEvents for NoopEvents {}

/// An async action over the selected rows (bulk delete, export, ...).
///
/// The engine awaits both steps but never retries or cancels them.
#[async_trait]
pub trait BulkActionHandler: Send + Sync {
    /// Asks the user to confirm. Defaults to confirmed.
    async fn confirm(&self, _ids: &[String]) -> bool {
        true
    }

    /// Runs the action.
    async fn execute(&self, ids: Vec<String>) -> Result<(), ActionError>;
}

/// What a bulk action run ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkOutcome {
    /// No row was selected; the handler was not called.
    NothingSelected,
    /// The user declined the confirmation.
    Cancelled,
    /// The action ran over `count` rows.
    Completed { count: usize },
}
