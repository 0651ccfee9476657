//! Read-only active filter summary

use super::ActiveFilter;
use super::FilterValue;
use super::Scalar;
use crate::model::FilterDefinition;
use crate::model::TableMetadata;

/// One removable entry of the active-filter summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    /// Id of the filter; pass to `remove_filter` to drop it.
    pub id: String,
    /// Human-readable label, e.g. `"Status is any of Active, Archived"`.
    pub label: String,
}

/// Builds the label `"{column} {operator} {value}"` for a filter.
///
/// Column and operator labels come from the metadata when available. The
/// value part is empty for presence checks, mapped through option labels for
/// select columns, and joined by `", "` for lists and ranges.
pub fn filter_label(filter: &ActiveFilter, metadata: Option<&TableMetadata>) -> String {
    let def = metadata.and_then(|m| m.definition(&filter.column));
    let column = def.map(FilterDefinition::label).unwrap_or(filter.column.as_str());
    let operator = match metadata {
        Some(m) => m.operator_label(&filter.operator),
        None => filter.operator.default_label(),
    };
    let value = if filter.operator.is_null_check() {
        String::new()
    } else {
        value_label(&filter.value, def)
    };

    format!("{} {} {}", column, operator, value).trim_end().to_string()
}

/// Builds the summary chips for a filter list.
pub fn filter_chips(filters: &[ActiveFilter], metadata: Option<&TableMetadata>) -> Vec<FilterChip> {
    filters
        .iter()
        .map(|f| FilterChip {
            id: f.id.clone(),
            label: filter_label(f, metadata),
        })
        .collect()
}

fn value_label(value: &FilterValue, def: Option<&FilterDefinition>) -> String {
    let label = |s: &Scalar| {
        def.and_then(|d| d.option_label(s))
            .map(str::to_string)
            .unwrap_or_else(|| s.to_text())
    };
    match value {
        FilterValue::Empty => String::new(),
        FilterValue::Scalar(s) => label(s),
        FilterValue::Range(start, end) => format!("{}, {}", label(start), label(end)),
        FilterValue::Multi(values) => values.iter().map(label).collect::<Vec<_>>().join(", "),
    }
}
