//! Grouping engine
//!
//! Rows are grouped by a composite label built from the selected group
//! columns, in the order the user picked them (not schema order).

use log::debug;

use crate::model::find_column;
use crate::model::value;
use crate::model::GroupableColumn;
use crate::model::TableColumn;
use crate::model::TableRow;

/// Separator between `"{header}: {value}"` pairs.
pub const GROUP_SEPARATOR: &str = " | ";

/// Builds the group label for one row.
///
/// Pairs whose value is missing or blank are skipped. When nothing is left,
/// or when a selected id is not in `columns`, the pair is dropped and the
/// result falls back to `ungrouped`.
///
/// ```
/// use tableview_lib::group::group_label;
/// use tableview_lib::model::{TableColumn, TableRow};
///
/// let columns = vec![
///     TableColumn::new("level", "Level"),
///     TableColumn::new("status", "Status"),
/// ];
/// let row = TableRow::new("1").set("status", "Active").set("level", "L1");
/// let groups = vec!["status".to_string(), "level".to_string()];
///
/// assert_eq!(group_label(&row, &groups, &columns, "Ungrouped"), "Status: Active | Level: L1");
/// assert_eq!(group_label(&row, &[], &columns, "Ungrouped"), "Ungrouped");
/// ```
pub fn group_label(row: &TableRow, group_columns: &[String], columns: &[TableColumn], ungrouped: &str) -> String {
    let pairs: Vec<String> = group_columns
        .iter()
        .filter_map(|id| find_column(columns, id))
        .filter_map(|column| {
            let cell = row.get(&column.accessor_key).filter(|v| !value::is_blank(v))?;
            let text = value::plain_text(cell);
            (!text.is_empty()).then(|| format!("{}: {}", column.header, text))
        })
        .collect();

    if pairs.is_empty() {
        ungrouped.to_string()
    } else {
        pairs.join(GROUP_SEPARATOR)
    }
}

/// Attaches (or clears) the `group` label of every row.
pub fn assign_groups(
    mut rows: Vec<TableRow>,
    group_columns: &[String],
    columns: &[TableColumn],
    ungrouped: &str,
) -> Vec<TableRow> {
    for row in &mut rows {
        row.group = if group_columns.is_empty() {
            None
        } else {
            Some(group_label(row, group_columns, columns, ungrouped))
        };
    }
    rows
}

/// Adds `column` to the selection, or removes it if already present.
/// Returns `true` when the column is grouped afterwards.
pub fn toggle_group(group_columns: &mut Vec<String>, column: &str) -> bool {
    if let Some(pos) = group_columns.iter().position(|c| c == column) {
        group_columns.remove(pos);
        debug!("Ungrouped column {column}");
        false
    } else {
        group_columns.push(column.to_string());
        debug!("Grouped by column {column}");
        true
    }
}

/// Column ids the user may group by.
///
/// With an explicit `groupable` list only the listed ids that exist in the
/// schema are eligible; without one every non-structural column is.
pub fn eligible_columns(columns: &[TableColumn], groupable: Option<&[GroupableColumn]>) -> Vec<String> {
    match groupable {
        Some(list) => list
            .iter()
            .filter(|g| find_column(columns, &g.id).is_some())
            .map(|g| g.id.clone())
            .collect(),
        None => columns
            .iter()
            .filter(|c| !c.is_structural())
            .map(|c| c.id.clone())
            .collect(),
    }
}

/// Group columns selected at construction.
pub fn default_groups(groupable: Option<&[GroupableColumn]>) -> Vec<String> {
    groupable
        .unwrap_or_default()
        .iter()
        .filter(|g| g.is_default)
        .map(|g| g.id.clone())
        .collect()
}
