use std::collections::BTreeMap;
use std::collections::BTreeSet;

use log::debug;

use crate::model::find_column;
use crate::model::TableColumn;
use crate::model::ACTIONS_COLUMN;

/// Narrowest width a column can be resized to, in the front-end's units.
pub const MIN_COLUMN_WIDTH: u16 = 4;

/// Which columns the user has hidden, and how wide they made the rest.
///
/// Stored as the hidden set so columns added by a later schema change show
/// up by default. The `actions` column is always visible and the last
/// visible data column cannot be hidden.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnVisibility {
    hidden: BTreeSet<String>,
    initial: BTreeSet<String>,
    widths: BTreeMap<String, u16>,
}

impl ColumnVisibility {
    /// All columns visible.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `hidden` columns hidden; `reset` returns here.
    ///
    /// The initial set goes through the same rules as [`hide`](Self::hide):
    /// unknown ids and `actions` are ignored, and the last visible data
    /// column stays visible.
    pub fn with_hidden(hidden: impl IntoIterator<Item = impl Into<String>>, columns: &[TableColumn]) -> Self {
        let mut visibility = Self {
            initial: hidden.into_iter().map(Into::into).collect(),
            ..Self::default()
        };
        visibility.reset(columns);
        visibility
    }

    pub fn is_visible(&self, id: &str) -> bool {
        id == ACTIONS_COLUMN || !self.hidden.contains(id)
    }

    /// Ids currently hidden.
    pub fn hidden(&self) -> impl Iterator<Item = &str> {
        self.hidden.iter().map(String::as_str)
    }

    /// The visible subset of `columns`, in schema order.
    pub fn visible(&self, columns: &[TableColumn]) -> Vec<TableColumn> {
        columns
            .iter()
            .filter(|c| self.is_visible(&c.id))
            .cloned()
            .collect()
    }

    /// Hides a column. Returns `true` if the column was visible and is now
    /// hidden.
    pub fn hide(&mut self, id: &str, columns: &[TableColumn]) -> bool {
        let Some(column) = find_column(columns, id) else {
            return false;
        };
        if column.id == ACTIONS_COLUMN || !self.is_visible(id) {
            return false;
        }
        let remaining = columns
            .iter()
            .filter(|c| !c.is_structural() && c.id != id && self.is_visible(&c.id))
            .count();
        if !column.is_structural() && remaining == 0 {
            debug!("Refusing to hide last visible column {id}");
            return false;
        }
        self.hidden.insert(id.to_string())
    }

    /// Shows a column. Returns `true` if it was hidden.
    pub fn show(&mut self, id: &str) -> bool {
        self.hidden.remove(id)
    }

    /// Flips a column's visibility. Returns `true` if anything changed.
    pub fn toggle(&mut self, id: &str, columns: &[TableColumn]) -> bool {
        if self.is_visible(id) {
            self.hide(id, columns)
        } else {
            self.show(id)
        }
    }

    pub fn show_all(&mut self) {
        self.hidden.clear();
    }

    /// Restores the initial hidden set and drops every resized width.
    pub fn reset(&mut self, columns: &[TableColumn]) {
        self.hidden.clear();
        self.widths.clear();
        let initial = self.initial.clone();
        for id in &initial {
            self.hide(id, columns);
        }
    }

    /// Width the user gave a column, `None` when never resized.
    pub fn width(&self, id: &str) -> Option<u16> {
        self.widths.get(id).copied()
    }

    /// Sets a column's width, clamped to [`MIN_COLUMN_WIDTH`]. Returns the
    /// applied width, or `None` for unknown and `actions` columns.
    pub fn resize(&mut self, id: &str, width: u16, columns: &[TableColumn]) -> Option<u16> {
        if id == ACTIONS_COLUMN || find_column(columns, id).is_none() {
            return None;
        }
        let width = width.max(MIN_COLUMN_WIDTH);
        self.widths.insert(id.to_string(), width);
        Some(width)
    }
}
