//! Table row

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// One record displayed by the table.
///
/// Rows are owned by the producer. The engine only ever touches `selected`
/// (selection tracking) and `group` (grouping label); `columns` is read-only.
///
/// # Example
///
/// ```
/// use tableview_lib::model::TableRow;
///
/// let row = TableRow::new("42")
///     .set("name", "Ada Lovelace")
///     .set("level", 3);
///
/// assert_eq!(row.get("name").and_then(|v| v.as_str()), Some("Ada Lovelace"));
/// assert!(!row.selected);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Stable row identifier, used to carry selection across refreshes.
    pub id: String,

    /// Optional avatar URL shown in card view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    /// Whether the row is selected.
    #[serde(default)]
    pub selected: bool,

    /// Composite group label, present only while grouping is active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// Cell values keyed by column accessor.
    #[serde(default)]
    pub columns: BTreeMap<String, Value>,
}

impl TableRow {
    /// Creates an empty, unselected row.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            avatar: None,
            selected: false,
            group: None,
            columns: BTreeMap::new(),
        }
    }

    /// Sets a cell value (builder style).
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.columns.insert(key.into(), value.into());
        self
    }

    /// Sets the avatar URL.
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Marks the row as selected or not.
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Returns the raw value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.columns.get(key)
    }

    /// Returns `true` if the value under `key` is missing, null or an empty string.
    pub fn is_blank(&self, key: &str) -> bool {
        match self.columns.get(key) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        }
    }
}
