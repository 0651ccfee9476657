//! Local filter evaluation
//!
//! Used only when the filter axis is owned by the table itself; a controlled
//! table receives rows that the owner has already filtered.

use std::cmp::Ordering;

use chrono::NaiveDate;
use log::trace;
use serde_json::Value;

use super::ActiveFilter;
use super::FilterOperator;
use super::FilterValue;
use super::Scalar;
use crate::model::find_column;
use crate::model::value;
use crate::model::TableColumn;
use crate::model::TableRow;

/// Keeps the rows that satisfy every filter.
pub fn filter_rows(rows: Vec<TableRow>, filters: &[ActiveFilter], columns: &[TableColumn]) -> Vec<TableRow> {
    if filters.is_empty() {
        return rows;
    }
    rows.into_iter()
        .filter(|row| matches_all(row, filters, columns))
        .collect()
}

/// Returns `true` if `row` satisfies every filter (logical AND).
pub fn matches_all(row: &TableRow, filters: &[ActiveFilter], columns: &[TableColumn]) -> bool {
    filters.iter().all(|f| matches_filter(row, f, columns))
}

/// Evaluates a single filter against a row.
///
/// Unknown operators keep the row: the engine cannot evaluate them and must
/// not hide data because of them.
pub fn matches_filter(row: &TableRow, filter: &ActiveFilter, columns: &[TableColumn]) -> bool {
    let key = find_column(columns, &filter.column)
        .map(|c| c.accessor_key.as_str())
        .unwrap_or(filter.column.as_str());
    let cell = row.get(key).filter(|v| !value::is_blank(v));

    let Some(cell) = cell else {
        return matches!(
            filter.operator,
            FilterOperator::IsNull | FilterOperator::NotEquals | FilterOperator::NotContains | FilterOperator::NotIn
        );
    };

    let operand = match &filter.value {
        FilterValue::Scalar(s) => Some(s),
        _ => None,
    };

    match &filter.operator {
        FilterOperator::IsNull => false,
        FilterOperator::IsNotNull => true,
        FilterOperator::Equals => operand.is_some_and(|s| equals(cell, s)),
        FilterOperator::NotEquals => operand.is_none_or(|s| !equals(cell, s)),
        FilterOperator::Contains => operand.is_some_and(|s| text_of(cell).contains(&s.to_text().to_lowercase())),
        FilterOperator::NotContains => {
            operand.is_none_or(|s| !text_of(cell).contains(&s.to_text().to_lowercase()))
        }
        FilterOperator::StartsWith => operand.is_some_and(|s| text_of(cell).starts_with(&s.to_text().to_lowercase())),
        FilterOperator::EndsWith => operand.is_some_and(|s| text_of(cell).ends_with(&s.to_text().to_lowercase())),
        FilterOperator::GreaterThan | FilterOperator::After => {
            operand.is_some_and(|s| compare(cell, s) == Some(Ordering::Greater))
        }
        FilterOperator::GreaterOrEqual => {
            operand.is_some_and(|s| matches!(compare(cell, s), Some(Ordering::Greater | Ordering::Equal)))
        }
        FilterOperator::LessThan | FilterOperator::Before => {
            operand.is_some_and(|s| compare(cell, s) == Some(Ordering::Less))
        }
        FilterOperator::LessOrEqual => {
            operand.is_some_and(|s| matches!(compare(cell, s), Some(Ordering::Less | Ordering::Equal)))
        }
        FilterOperator::Between => match &filter.value {
            FilterValue::Range(start, end) => in_range(cell, start, end),
            _ => true,
        },
        FilterOperator::In => filter.value.operands().into_iter().any(|s| equals(cell, s)),
        FilterOperator::NotIn => !filter.value.operands().into_iter().any(|s| equals(cell, s)),
        FilterOperator::Other(name) => {
            trace!("Cannot evaluate operator {:?} locally, keeping row {}", name, row.id);
            true
        }
    }
}

fn text_of(cell: &Value) -> String {
    value::plain_text(cell).to_lowercase()
}

fn equals(cell: &Value, operand: &Scalar) -> bool {
    if let Value::Array(items) = cell {
        return items.iter().any(|item| equals(item, operand));
    }
    match Scalar::from_json(cell) {
        Some(Scalar::Text(a)) => match operand {
            Scalar::Text(b) => a.to_lowercase() == b.to_lowercase(),
            other => Scalar::Text(a).loosely_equals(other),
        },
        Some(scalar) => scalar.loosely_equals(operand),
        None => value::plain_text(cell).eq_ignore_ascii_case(&operand.to_text()),
    }
}

fn compare(cell: &Value, operand: &Scalar) -> Option<Ordering> {
    if let (Some(a), Some(b)) = (value::as_number(cell), operand.as_number()) {
        return a.partial_cmp(&b);
    }
    let text = value::plain_text(cell);
    if let (Some(a), Some(b)) = (parse_date(&text), parse_date(&operand.to_text())) {
        return Some(a.cmp(&b));
    }
    Some(text.to_lowercase().cmp(&operand.to_text().to_lowercase()))
}

fn in_range(cell: &Value, start: &Scalar, end: &Scalar) -> bool {
    let above = start.is_blank() || matches!(compare(cell, start), Some(Ordering::Greater | Ordering::Equal));
    let below = end.is_blank() || matches!(compare(cell, end), Some(Ordering::Less | Ordering::Equal));
    above && below
}

/// Parses `YYYY-MM-DD`, ignoring any time part that follows.
fn parse_date(text: &str) -> Option<NaiveDate> {
    let date = text.get(..10).unwrap_or(text);
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<TableColumn> {
        vec![
            TableColumn::new("name", "Name"),
            TableColumn::new("level", "Level").accessor("level_code"),
            TableColumn::new("joined", "Joined"),
        ]
    }

    fn row() -> TableRow {
        TableRow::new("1")
            .set("name", "Grace Hopper")
            .set("level_code", 3)
            .set("joined", "2024-01-15T08:00:00Z")
            .set("email", "")
    }

    fn check(operator: &str, value: FilterValue, column: &str) -> bool {
        let filter = ActiveFilter::new(column, operator, value);
        matches_filter(&row(), &filter, &columns())
    }

    #[test]
    fn test_text_operators_ignore_case() {
        assert!(check("contains", FilterValue::scalar("HOPPER"), "name"));
        assert!(check("startsWith", FilterValue::scalar("grace"), "name"));
        assert!(!check("endsWith", FilterValue::scalar("grace"), "name"));
        assert!(check("equals", FilterValue::scalar("grace hopper"), "name"));
    }

    #[test]
    fn test_numeric_operators_use_accessor() {
        assert!(check(">", FilterValue::scalar(2), "level"));
        assert!(check("<=", FilterValue::scalar("3"), "level"));
        assert!(!check("lt", FilterValue::scalar(3), "level"));
    }

    #[test]
    fn test_date_range() {
        assert!(check("between", FilterValue::range("2024-01-01", "2024-01-31"), "joined"));
        assert!(!check("between", FilterValue::range("2024-02-01", "2024-02-28"), "joined"));
        assert!(check("between", FilterValue::range("2024-01-01", ""), "joined"));
        assert!(check("before", FilterValue::scalar("2024-02-01"), "joined"));
    }

    #[test]
    fn test_presence_checks() {
        assert!(check("isNull", FilterValue::Empty, "email"));
        assert!(check("isNull", FilterValue::Empty, "missing"));
        assert!(check("isNotNull", FilterValue::Empty, "name"));
        assert!(check("notEquals", FilterValue::scalar("x"), "email"));
    }

    #[test]
    fn test_in_and_not_in() {
        assert!(check("in", FilterValue::multi([1, 3]), "level"));
        assert!(check("notIn", FilterValue::multi([1, 2]), "level"));
    }

    #[test]
    fn test_unknown_operator_keeps_row() {
        assert!(check("near", FilterValue::scalar("x"), "name"));
    }

    #[test]
    fn test_filter_rows_combines_with_and() {
        let rows = vec![
            row(),
            TableRow::new("2").set("name", "Alan Turing").set("level_code", 5),
        ];
        let filters = vec![
            ActiveFilter::new("level", "gte", FilterValue::scalar(3)),
            ActiveFilter::new("name", "contains", FilterValue::scalar("alan")),
        ];
        let kept = filter_rows(rows, &filters, &columns());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "2");
    }
}
