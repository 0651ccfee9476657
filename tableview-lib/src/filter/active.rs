//! Active filter list

use log::debug;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::FilterOperator;
use super::FilterValue;
use crate::model::FilterKind;

/// A committed `(column, operator, value)` predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveFilter {
    /// Opaque identifier used to remove the filter.
    pub id: String,
    /// Column id the filter applies to.
    pub column: String,
    /// Comparison operator.
    pub operator: FilterOperator,
    /// Operand(s), shaped for the operator.
    #[serde(default)]
    pub value: FilterValue,
}

impl ActiveFilter {
    /// Creates a filter with a freshly generated id.
    pub fn new(column: impl Into<String>, operator: impl Into<FilterOperator>, value: FilterValue) -> Self {
        Self {
            id: new_filter_id(),
            column: column.into(),
            operator: operator.into(),
            value,
        }
    }
}

/// An in-progress filter in the builder.
///
/// `operator` is `None` until a column has been picked.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterDraft {
    /// Draft identifier; kept when the draft is committed.
    pub id: String,
    /// Column id, empty until chosen.
    pub column: String,
    /// Chosen operator.
    pub operator: Option<FilterOperator>,
    /// Entered value.
    pub value: FilterValue,
    /// Column type, when known from metadata.
    pub kind: Option<FilterKind>,
}

impl FilterDraft {
    /// Creates an empty draft.
    pub fn blank() -> Self {
        Self {
            id: new_filter_id(),
            column: String::new(),
            operator: None,
            value: FilterValue::Empty,
            kind: None,
        }
    }

    /// Creates a fully specified draft.
    pub fn new(column: impl Into<String>, operator: impl Into<FilterOperator>, value: FilterValue) -> Self {
        Self {
            id: new_filter_id(),
            column: column.into(),
            operator: Some(operator.into()),
            value,
            kind: None,
        }
    }

    /// Sets the column type used for value coercion.
    pub fn with_kind(mut self, kind: FilterKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Returns `true` if committing this draft would produce a filter.
    ///
    /// Presence checks (`isNull`/`isNotNull`) need no value; every other
    /// operator needs a non-blank one.
    pub fn is_complete(&self) -> bool {
        match &self.operator {
            _ if self.column.is_empty() => false,
            None => false,
            Some(op) if op.is_null_check() => true,
            Some(_) => !self.value.is_blank(),
        }
    }
}

impl From<&ActiveFilter> for FilterDraft {
    fn from(filter: &ActiveFilter) -> Self {
        Self {
            id: filter.id.clone(),
            column: filter.column.clone(),
            operator: Some(filter.operator.clone()),
            value: filter.value.clone(),
            kind: None,
        }
    }
}

/// Commits a list of drafts.
///
/// Drafts with no column, or whose value is blank (for operators that take a
/// value), are dropped. Remaining values are reshaped for their operator but
/// not otherwise validated. The caller forwards the result to the owner
/// (controlled) or stores it (uncontrolled).
pub fn apply_filters(drafts: &[FilterDraft]) -> Vec<ActiveFilter> {
    let applied: Vec<ActiveFilter> = drafts
        .iter()
        .filter(|d| d.is_complete())
        .filter_map(|d| {
            let operator = d.operator.clone()?;
            Some(ActiveFilter {
                id: d.id.clone(),
                column: d.column.clone(),
                value: d.value.clone().coerce(&operator, d.kind),
                operator,
            })
        })
        .collect();
    debug!("Applied {} of {} filter drafts", applied.len(), drafts.len());
    applied
}

/// Returns an empty filter list.
pub fn clear_filters() -> Vec<ActiveFilter> {
    Vec::new()
}

/// Returns `filters` without the filter with the given id.
pub fn remove_filter(filters: &[ActiveFilter], id: &str) -> Vec<ActiveFilter> {
    filters.iter().filter(|f| f.id != id).cloned().collect()
}

fn new_filter_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_drops_empty_drafts() {
        let drafts = vec![FilterDraft::new("", "=", FilterValue::scalar(""))];
        assert!(apply_filters(&drafts).is_empty());

        let drafts = vec![FilterDraft::new("name", "=", FilterValue::Empty)];
        assert!(apply_filters(&drafts).is_empty());

        assert!(apply_filters(&[FilterDraft::blank()]).is_empty());
    }

    #[test]
    fn test_apply_keeps_between_pair() {
        let drafts = vec![FilterDraft::new(
            "created_at",
            "between",
            FilterValue::range("2024-01-01", "2024-01-31"),
        )];
        let applied = apply_filters(&drafts);
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].value, FilterValue::range("2024-01-01", "2024-01-31"));
        assert_eq!(applied[0].id, drafts[0].id);
    }

    #[test]
    fn test_apply_keeps_null_check_without_value() {
        let drafts = vec![FilterDraft::new("email", "isNull", FilterValue::scalar("leftover"))];
        let applied = apply_filters(&drafts);
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].value, FilterValue::Empty);
    }

    #[test]
    fn test_remove_and_clear() {
        let a = ActiveFilter::new("name", "contains", FilterValue::scalar("a"));
        let b = ActiveFilter::new("level", "=", FilterValue::scalar(1));
        let list = vec![a.clone(), b.clone()];

        assert_eq!(remove_filter(&list, &a.id), vec![b]);
        assert_eq!(remove_filter(&list, "missing").len(), 2);
        assert!(clear_filters().is_empty());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = ActiveFilter::new("x", "=", FilterValue::scalar(1));
        let b = ActiveFilter::new("x", "=", FilterValue::scalar(1));
        assert_ne!(a.id, b.id);
    }
}
