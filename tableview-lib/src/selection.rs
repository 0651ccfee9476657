//! Selection tracker
//!
//! Selection lives on the rows themselves (`TableRow::selected`). These
//! helpers carry it across data refreshes and implement scoped select-all.

use std::collections::HashMap;
use std::collections::HashSet;

use crate::model::TableRow;

/// Carries `selected` over from `previous` rows with the same id.
///
/// Rows that are new default to unselected, whatever flag they arrived with.
/// Rows only present in `previous` are dropped.
pub fn reconcile(mut rows: Vec<TableRow>, previous: &[TableRow]) -> Vec<TableRow> {
    let prior: HashMap<&str, bool> = previous.iter().map(|r| (r.id.as_str(), r.selected)).collect();
    for row in &mut rows {
        row.selected = prior.get(row.id.as_str()).copied().unwrap_or(false);
    }
    rows
}

/// Flips `selected` on the row with `id`. Returns `true` if a row matched.
pub fn toggle_row(rows: &mut [TableRow], id: &str) -> bool {
    match rows.iter_mut().find(|r| r.id == id) {
        Some(row) => {
            row.selected = !row.selected;
            true
        }
        None => false,
    }
}

/// Sets `selected` on every row whose id is in `scope`; others are untouched.
pub fn toggle_all(rows: &mut [TableRow], selected: bool, scope: &[String]) {
    let scope: HashSet<&str> = scope.iter().map(String::as_str).collect();
    rows.iter_mut()
        .filter(|r| scope.contains(r.id.as_str()))
        .for_each(|r| r.selected = selected);
}

/// Clears the selection of the given rows.
pub fn deselect(rows: &mut [TableRow], ids: &[String]) {
    toggle_all(rows, false, ids);
}

/// Number of selected rows.
pub fn count(rows: &[TableRow]) -> usize {
    rows.iter().filter(|r| r.selected).count()
}

/// Ids of the selected rows, in row order.
pub fn selected_ids(rows: &[TableRow]) -> Vec<String> {
    rows.iter().filter(|r| r.selected).map(|r| r.id.clone()).collect()
}

/// Header checkbox state: `true` when `scope` is non-empty and every row in it
/// is selected.
pub fn all_selected(rows: &[TableRow], scope: &[String]) -> bool {
    if scope.is_empty() {
        return false;
    }
    let scope: HashSet<&str> = scope.iter().map(String::as_str).collect();
    let mut in_scope = rows.iter().filter(|r| scope.contains(r.id.as_str())).peekable();
    in_scope.peek().is_some() && in_scope.all(|r| r.selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reconcile_keeps_prior_flags() {
        let previous = vec![
            TableRow::new("1").with_selected(true),
            TableRow::new("2").with_selected(false),
        ];
        let fresh = vec![TableRow::new("2"), TableRow::new("3").with_selected(true)];

        let rows = reconcile(fresh, &previous);
        let flags: Vec<_> = rows.iter().map(|r| (r.id.as_str(), r.selected)).collect();
        assert_eq!(flags, [("2", false), ("3", false)]);
    }

    #[test]
    fn test_reconcile_survives_refresh() {
        let previous = vec![TableRow::new("1").with_selected(true)];
        let rows = reconcile(vec![TableRow::new("1").set("name", "renamed")], &previous);
        assert!(rows[0].selected);
    }

    #[test]
    fn test_toggle_row() {
        let mut rows = vec![TableRow::new("1"), TableRow::new("2")];
        assert!(toggle_row(&mut rows, "2"));
        assert!(!toggle_row(&mut rows, "9"));
        assert_eq!(selected_ids(&rows), ["2"]);
    }

    #[test]
    fn test_toggle_all_is_scoped() {
        let mut rows = vec![
            TableRow::new("1"),
            TableRow::new("2"),
            TableRow::new("3"),
            TableRow::new("4").with_selected(true),
        ];
        toggle_all(&mut rows, true, &ids(&["2", "3"]));
        assert_eq!(selected_ids(&rows), ["2", "3", "4"]);
        assert!(!rows[0].selected);

        toggle_all(&mut rows, false, &ids(&["2"]));
        assert_eq!(count(&rows), 2);
    }

    #[test]
    fn test_all_selected() {
        let rows = vec![TableRow::new("1").with_selected(true), TableRow::new("2")];
        assert!(all_selected(&rows, &ids(&["1"])));
        assert!(!all_selected(&rows, &ids(&["1", "2"])));
        assert!(!all_selected(&rows, &[]));
        assert!(!all_selected(&rows, &ids(&["9"])));
    }
}
