//! Display helpers for dynamic cell values

use std::cmp::Ordering;

use serde_json::Value;

/// Object fields tried, in order, when an object value has to be shown as text.
const DISPLAY_FIELDS: [&str; 4] = ["name", "label", "title", "value"];

/// Formats a cell value as plain text.
///
/// Scalars render as-is (`true`/`false` for booleans), null as an empty
/// string, arrays as their elements joined by `", "`. Objects render their
/// first displayable field (`name`, `label`, `title`, `value`); an object
/// without one renders as an empty string rather than failing.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use tableview_lib::model::value::plain_text;
///
/// assert_eq!(plain_text(&json!("Active")), "Active");
/// assert_eq!(plain_text(&json!({"name": "Room 4"})), "Room 4");
/// assert_eq!(plain_text(&json!({"id": 7})), "");
/// ```
pub fn plain_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(plain_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => DISPLAY_FIELDS
            .iter()
            .find_map(|field| map.get(*field).filter(|v| !v.is_object()))
            .map(plain_text)
            .unwrap_or_default(),
    }
}

/// Returns the numeric reading of a value, parsing numeric strings.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Returns `true` for null, missing-equivalent and empty-string values.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Orders two present, non-blank values.
///
/// A total order: values rank by class first (numbers, then booleans, then
/// text), so a column mixing `"10"`, `"9"` and `"1a"` sorts the same way
/// whatever the input order. Numbers (numeric strings included) compare by
/// value, booleans `false < true`, text case-insensitively. Ties fall back to
/// the raw text.
pub fn compare(a: &Value, b: &Value) -> Ordering {
    let ord = match (SortKey::of(a), SortKey::of(b)) {
        (SortKey::Number(x), SortKey::Number(y)) => x.total_cmp(&y),
        (SortKey::Bool(x), SortKey::Bool(y)) => x.cmp(&y),
        (SortKey::Text(x), SortKey::Text(y)) => x.cmp(&y),
        (x, y) => x.rank().cmp(&y.rank()),
    };
    ord.then_with(|| plain_text(a).cmp(&plain_text(b)))
}

enum SortKey {
    Number(f64),
    Bool(bool),
    Text(String),
}

impl SortKey {
    fn of(value: &Value) -> Self {
        match value {
            Value::Bool(b) => SortKey::Bool(*b),
            _ => match as_number(value) {
                Some(n) => SortKey::Number(n),
                None => SortKey::Text(plain_text(value).to_lowercase()),
            },
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Number(_) => 0,
            SortKey::Bool(_) => 1,
            SortKey::Text(_) => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_text_scalars() {
        assert_eq!(plain_text(&json!(null)), "");
        assert_eq!(plain_text(&json!(true)), "true");
        assert_eq!(plain_text(&json!(12)), "12");
        assert_eq!(plain_text(&json!(1.5)), "1.5");
    }

    #[test]
    fn test_plain_text_array_skips_empty() {
        assert_eq!(plain_text(&json!(["a", null, "b"])), "a, b");
    }

    #[test]
    fn test_plain_text_object_without_display_field() {
        assert_eq!(plain_text(&json!({"id": 1, "nested": {"name": "x"}})), "");
        assert_eq!(plain_text(&json!({"label": "Morning", "id": 1})), "Morning");
    }

    #[test]
    fn test_compare_numeric_strings() {
        assert_eq!(compare(&json!("10"), &json!("9")), Ordering::Greater);
        assert_eq!(compare(&json!(2), &json!("10")), Ordering::Less);
    }

    #[test]
    fn test_compare_text_case_insensitive() {
        assert_eq!(compare(&json!("alpha"), &json!("Beta")), Ordering::Less);
        assert_eq!(compare(&json!("ALPHA"), &json!("alpha")), Ordering::Less);
        assert_eq!(compare(&json!("alpha"), &json!("alpha")), Ordering::Equal);
    }

    #[test]
    fn test_compare_numbers_before_text() {
        assert_eq!(compare(&json!("10"), &json!("9")), Ordering::Greater);
        assert_eq!(compare(&json!("9"), &json!("1a")), Ordering::Less);
        assert_eq!(compare(&json!("10"), &json!("1a")), Ordering::Less);
        assert_eq!(compare(&json!(true), &json!("1a")), Ordering::Less);
        assert_eq!(compare(&json!(100), &json!(false)), Ordering::Less);
    }

    #[test]
    fn test_compare_nan_is_ordered() {
        assert_eq!(compare(&json!("NaN"), &json!("NaN")), Ordering::Equal);
        assert_eq!(compare(&json!("NaN"), &json!("inf")), Ordering::Greater);
        assert_eq!(compare(&json!(3), &json!("NaN")), Ordering::Less);
    }
}
