//! Column schema

use serde::Deserialize;
use serde::Serialize;

/// Column id reserved for per-row actions (edit/delete).
pub const ACTIONS_COLUMN: &str = "actions";

/// Column id reserved for the avatar cell.
pub const AVATAR_COLUMN: &str = "avatar";

/// Column definition.
///
/// Columns are immutable input: header text, the key used to read a value
/// out of [`TableRow::columns`](super::TableRow::columns), and whether the
/// header toggles sorting. Custom cell rendering is not part of the column;
/// it lives in [`CellRenderers`](crate::view::CellRenderers), keyed by id.
///
/// # Example
///
/// ```
/// use tableview_lib::model::TableColumn;
///
/// let columns = vec![
///     TableColumn::new("name", "Name").sortable(),
///     TableColumn::new("level", "Level").accessor("level_code"),
/// ];
/// assert_eq!(columns[1].accessor_key, "level_code");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn {
    /// Unique column identifier.
    pub id: String,
    /// Header text (already translated).
    pub header: String,
    /// Key into the row's `columns` map.
    pub accessor_key: String,
    /// Whether clicking the header toggles sorting.
    #[serde(default)]
    pub sortable: bool,
}

impl TableColumn {
    /// Creates a non-sortable column whose accessor equals its id.
    pub fn new(id: impl Into<String>, header: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            accessor_key: id.clone(),
            id,
            header: header.into(),
            sortable: false,
        }
    }

    /// Sets the accessor key.
    pub fn accessor(mut self, key: impl Into<String>) -> Self {
        self.accessor_key = key.into();
        self
    }

    /// Makes the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Returns `true` for the structural `actions`/`avatar` columns, which
    /// carry no data and are never grouped, searched or shown on cards.
    pub fn is_structural(&self) -> bool {
        self.id == ACTIONS_COLUMN || self.id == AVATAR_COLUMN
    }
}

/// A column the user may group by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupableColumn {
    /// Column id.
    pub id: String,
    /// Whether the column is grouped by default.
    #[serde(default)]
    pub is_default: bool,
}

impl GroupableColumn {
    /// Creates a groupable column that is not selected by default.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_default: false,
        }
    }

    /// Marks the column as grouped by default.
    pub fn default_on(mut self) -> Self {
        self.is_default = true;
        self
    }
}

/// Finds a column by id.
pub fn find_column<'a>(columns: &'a [TableColumn], id: &str) -> Option<&'a TableColumn> {
    columns.iter().find(|c| c.id == id)
}
