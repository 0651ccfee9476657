use std::time::Duration;

use log::debug;
use tokio::time::Instant;

use super::Debouncer;
use crate::config::Labels;
use crate::model::TableColumn;
use crate::model::TableRow;
use crate::view::CellRenderers;

/// Search input with a debounced commit.
///
/// `draft` follows every keystroke; `committed` only changes once typing
/// pauses for the debounce delay (or on an explicit flush/clear). Callers
/// propagate the value returned by the committing methods.
#[derive(Debug)]
pub struct SearchBox {
    draft: String,
    committed: String,
    debouncer: Debouncer<String>,
    enabled: bool,
}

impl SearchBox {
    pub fn new(initial: impl Into<String>, delay: Duration) -> Self {
        let initial = initial.into();
        Self {
            draft: initial.clone(),
            committed: initial,
            debouncer: Debouncer::new(delay),
            enabled: true,
        }
    }

    /// Text currently in the input.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Last committed search text.
    pub fn committed(&self) -> &str {
        &self.committed
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Records a keystroke and restarts the commit timer. Ignored while
    /// disabled.
    pub fn input(&mut self, text: impl Into<String>) {
        if !self.enabled {
            return;
        }
        self.draft = text.into();
        self.debouncer.schedule(self.draft.clone());
    }

    /// Commits the pending draft if its deadline has passed.
    pub fn tick(&mut self, now: Instant) -> Option<String> {
        let value = self.debouncer.poll(now)?;
        self.commit(value)
    }

    /// Waits out the debounce and commits.
    pub async fn settle(&mut self) -> Option<String> {
        let value = self.debouncer.settle().await?;
        self.commit(value)
    }

    /// Commits the pending draft immediately (e.g. on Enter).
    pub fn flush(&mut self) -> Option<String> {
        if !self.debouncer.cancel() {
            return None;
        }
        self.commit(self.draft.clone())
    }

    /// Empties the input and commits the empty query at once.
    pub fn clear(&mut self) -> Option<String> {
        self.debouncer.cancel();
        self.draft.clear();
        self.commit(String::new())
    }

    /// Adopts a value set from upstream, dropping any pending commit.
    pub fn set_committed(&mut self, value: impl Into<String>) {
        self.debouncer.cancel();
        self.committed = value.into();
        self.draft = self.committed.clone();
    }

    /// Disables the input and drops any pending commit.
    pub fn disable(&mut self) {
        if self.debouncer.cancel() {
            debug!("Pending search commit dropped on disable");
        }
        self.enabled = false;
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    fn commit(&mut self, value: String) -> Option<String> {
        if value == self.committed {
            return None;
        }
        debug!("Search committed: {value:?}");
        self.committed = value.clone();
        Some(value)
    }
}

/// Keeps rows where any visible data column contains `query`, ignoring case.
///
/// Cells are matched on their displayed text, so custom renderers and the
/// yes/no labels are searchable. A blank query keeps every row.
pub fn search_rows(
    rows: Vec<TableRow>,
    query: &str,
    columns: &[TableColumn],
    renderers: &CellRenderers,
    labels: &Labels,
) -> Vec<TableRow> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return rows;
    }
    rows.into_iter()
        .filter(|row| {
            columns
                .iter()
                .filter(|c| !c.is_structural())
                .any(|c| renderers.render(row, c, labels).to_lowercase().contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search() -> SearchBox {
        SearchBox::new("", Duration::from_millis(300))
    }

    #[tokio::test(start_paused = true)]
    async fn test_keystrokes_commit_once() {
        let mut search = search();
        search.input("a");
        search.input("ad");
        search.input("ada");

        assert_eq!(search.draft(), "ada");
        assert_eq!(search.committed(), "");
        assert_eq!(search.settle().await.as_deref(), Some("ada"));
        assert_eq!(search.committed(), "ada");
    }

    #[tokio::test(start_paused = true)]
    async fn test_disable_drops_pending() {
        let mut search = search();
        search.input("x");
        search.disable();
        search.input("y");

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(search.tick(Instant::now()), None);
        assert_eq!(search.committed(), "");
        assert_eq!(search.draft(), "x");
    }

    #[test]
    fn test_flush_and_clear() {
        let mut search = search();
        assert_eq!(search.flush(), None);

        search.input("ada");
        assert_eq!(search.flush().as_deref(), Some("ada"));
        assert!(!search.is_pending());

        assert_eq!(search.clear().as_deref(), Some(""));
        assert_eq!(search.clear(), None);
    }

    #[test]
    fn test_upstream_value_cancels_pending() {
        let mut search = search();
        search.input("typed");
        search.set_committed("server");

        assert!(!search.is_pending());
        assert_eq!(search.draft(), "server");
        assert_eq!(search.flush(), None);
    }

    #[test]
    fn test_search_rows_matches_visible_text() {
        let columns = vec![TableColumn::new("name", "Name"), TableColumn::new("active", "Active")];
        let rows = vec![
            TableRow::new("1").set("name", "Ada Lovelace").set("active", true).set("secret", "zzz"),
            TableRow::new("2").set("name", "Grace Hopper").set("active", false),
        ];
        let renderers = CellRenderers::new();
        let labels = Labels::default();

        let found = search_rows(rows.clone(), "  LOVE ", &columns, &renderers, &labels);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "1");

        assert_eq!(search_rows(rows.clone(), "no", &columns, &renderers, &labels)[0].id, "2");
        assert!(search_rows(rows.clone(), "zzz", &columns, &renderers, &labels).is_empty());
        assert_eq!(search_rows(rows, "", &columns, &renderers, &labels).len(), 2);
    }
}
