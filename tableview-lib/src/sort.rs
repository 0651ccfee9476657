//! Sort engine

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

use crate::model::find_column;
use crate::model::value;
use crate::model::TableColumn;
use crate::model::TableRow;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

/// The single active sort. `None` at the call sites means original row order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    /// Column id.
    pub column: String,
    /// Direction.
    pub direction: SortDirection,
}

impl SortConfig {
    /// Ascending sort on a column.
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Descending sort on a column.
    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Computes the next sort state when a column header is activated.
///
/// Cycles ascending → descending → unsorted on the same column; activating a
/// different column always starts over at ascending.
///
/// ```
/// use tableview_lib::sort::{toggle_sort, SortConfig};
///
/// let asc = toggle_sort("name", None);
/// assert_eq!(asc, Some(SortConfig::asc("name")));
/// let desc = toggle_sort("name", asc.as_ref());
/// assert_eq!(desc, Some(SortConfig::desc("name")));
/// assert_eq!(toggle_sort("name", desc.as_ref()), None);
/// ```
pub fn toggle_sort(column: &str, current: Option<&SortConfig>) -> Option<SortConfig> {
    match current {
        Some(sort) if sort.column == column => match sort.direction {
            SortDirection::Asc => Some(SortConfig::desc(column)),
            SortDirection::Desc => None,
        },
        _ => Some(SortConfig::asc(column)),
    }
}

/// Orders rows by the active sort. Stable; blank values always sort last.
///
/// A sort on a column that is not in `columns` leaves the rows untouched.
pub fn sort_rows(mut rows: Vec<TableRow>, sort: Option<&SortConfig>, columns: &[TableColumn]) -> Vec<TableRow> {
    let Some(sort) = sort else {
        return rows;
    };
    let Some(column) = find_column(columns, &sort.column) else {
        return rows;
    };
    let key = column.accessor_key.as_str();

    rows.sort_by(|a, b| {
        let a = a.get(key).filter(|v| !value::is_blank(v));
        let b = b.get(key).filter(|v| !value::is_blank(v));
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => {
                let ord = value::compare(a, b);
                match sort.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            }
        }
    });
    rows
}
