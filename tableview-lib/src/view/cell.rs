use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::config::Labels;
use crate::model::value::plain_text;
use crate::model::TableColumn;
use crate::model::TableRow;

/// Custom formatting for the cells of one column.
///
/// Implemented for any `Fn(&TableRow, &TableColumn) -> String`, so a closure
/// can be registered directly.
pub trait CellRenderer: Send + Sync {
    fn render(&self, row: &TableRow, column: &TableColumn) -> String;
}

impl<F> CellRenderer for F
where
    F: Fn(&TableRow, &TableColumn) -> String + Send + Sync,
{
    fn render(&self, row: &TableRow, column: &TableColumn) -> String {
        self(row, column)
    }
}

/// Side registry of cell renderers keyed by column id.
///
/// Columns without an entry fall back to [`format_value`].
///
/// # Example
///
/// ```
/// use tableview_lib::config::Labels;
/// use tableview_lib::model::{TableColumn, TableRow};
/// use tableview_lib::view::CellRenderers;
///
/// let mut renderers = CellRenderers::new();
/// renderers.register("name", |row: &TableRow, column: &TableColumn| {
///     let name = row.get(&column.accessor_key).and_then(|v| v.as_str()).unwrap_or("");
///     name.to_uppercase()
/// });
///
/// let column = TableColumn::new("name", "Name");
/// let row = TableRow::new("1").set("name", "ada");
/// assert_eq!(renderers.render(&row, &column, &Labels::default()), "ADA");
/// ```
#[derive(Clone, Default)]
pub struct CellRenderers {
    renderers: HashMap<String, Arc<dyn CellRenderer>>,
}

impl CellRenderers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the renderer for a column.
    pub fn register(&mut self, column: impl Into<String>, renderer: impl CellRenderer + 'static) {
        self.renderers.insert(column.into(), Arc::new(renderer));
    }

    /// Returns `true` if the column has a custom renderer.
    pub fn has(&self, column: &str) -> bool {
        self.renderers.contains_key(column)
    }

    /// Formats one cell.
    pub fn render(&self, row: &TableRow, column: &TableColumn, labels: &Labels) -> String {
        match self.renderers.get(&column.id) {
            Some(renderer) => renderer.render(row, column),
            None => row
                .get(&column.accessor_key)
                .map(|v| format_value(v, labels))
                .unwrap_or_default(),
        }
    }
}

impl fmt::Debug for CellRenderers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellRenderers")
            .field("columns", &self.renderers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Default-by-type cell formatting.
///
/// Booleans use the configured yes/no labels, including inside arrays; every
/// other shape goes through [`plain_text`].
pub fn format_value(value: &Value, labels: &Labels) -> String {
    match value {
        Value::Bool(true) => labels.yes.clone(),
        Value::Bool(false) => labels.no.clone(),
        Value::Array(items) => items
            .iter()
            .map(|v| format_value(v, labels))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        other => plain_text(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_formatting() {
        let labels = Labels::default();
        assert_eq!(format_value(&json!(true), &labels), "Yes");
        assert_eq!(format_value(&json!(null), &labels), "");
        assert_eq!(format_value(&json!([true, "x", null]), &labels), "Yes, x");
        assert_eq!(format_value(&json!({"title": "Dr"}), &labels), "Dr");
        assert_eq!(format_value(&json!({"id": 3}), &labels), "");
    }

    #[test]
    fn test_registry_falls_back_to_default() {
        let mut renderers = CellRenderers::new();
        renderers.register("level", |_: &TableRow, _: &TableColumn| "custom".to_string());

        let row = TableRow::new("1").set("active", false).set("level", 2);
        let labels = Labels::default();
        assert_eq!(renderers.render(&row, &TableColumn::new("level", "Level"), &labels), "custom");
        assert_eq!(renderers.render(&row, &TableColumn::new("active", "Active"), &labels), "No");
        assert_eq!(renderers.render(&row, &TableColumn::new("missing", "?"), &labels), "");
        assert!(renderers.has("level"));
    }
}
