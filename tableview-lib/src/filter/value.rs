//! Typed filter values

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use super::FilterOperator;
use crate::model::FilterKind;

/// A single filter operand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Boolean operand.
    Bool(bool),
    /// Numeric operand.
    Number(f64),
    /// Text operand (also used for dates and option keys).
    Text(String),
}

impl Scalar {
    /// Returns `true` for the empty string.
    pub fn is_blank(&self) -> bool {
        matches!(self, Scalar::Text(s) if s.is_empty())
    }

    /// Returns the numeric reading of this operand, parsing text.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => Some(*n),
            Scalar::Text(s) => s.trim().parse().ok(),
            Scalar::Bool(_) => None,
        }
    }

    /// Returns the operand as text.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Compares two operands across representations.
    ///
    /// `2`, `2.0` and `"2"` are equal; `true` and `"true"` are equal. This is
    /// the only place value coercion happens when matching option labels.
    pub fn loosely_equals(&self, other: &Scalar) -> bool {
        match (self, other) {
            (Scalar::Text(a), Scalar::Text(b)) => a == b,
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            _ => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => a == b,
                _ => self.to_text() == other.to_text(),
            },
        }
    }

    /// Converts a JSON value into an operand, if it is scalar.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Bool(b) => Some(Scalar::Bool(*b)),
            serde_json::Value::Number(n) => n.as_f64().map(Scalar::Number),
            serde_json::Value::String(s) => Some(Scalar::Text(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Text(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Text(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Number(v)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Number(v as f64)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Number(v as f64)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

/// The operand(s) of a filter; its shape depends on the operator.
///
/// | Operator | Shape |
/// |----------|-------|
/// | `isNull`, `isNotNull` | `Empty` |
/// | `between` | `Range` |
/// | `in`, `notIn` on `select` columns | `Multi` |
/// | everything else | `Scalar` |
///
/// On the wire a value is `null`, a scalar, or an array; [`FilterValue::coerce`]
/// turns the loose wire shape into the one the operator expects.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "WireValue", into = "WireValue")]
pub enum FilterValue {
    /// No value.
    #[default]
    Empty,
    /// A single operand.
    Scalar(Scalar),
    /// An inclusive `[start, end]` pair.
    Range(Scalar, Scalar),
    /// A list of operands.
    Multi(Vec<Scalar>),
}

impl FilterValue {
    /// Creates a single-operand value.
    pub fn scalar(value: impl Into<Scalar>) -> Self {
        FilterValue::Scalar(value.into())
    }

    /// Creates a range value.
    pub fn range(start: impl Into<Scalar>, end: impl Into<Scalar>) -> Self {
        FilterValue::Range(start.into(), end.into())
    }

    /// Creates a list value.
    pub fn multi<T: Into<Scalar>>(values: impl IntoIterator<Item = T>) -> Self {
        FilterValue::Multi(values.into_iter().map(Into::into).collect())
    }

    /// Returns `true` when the value carries nothing: null, `""`, an empty
    /// list, or a range with both ends empty.
    pub fn is_blank(&self) -> bool {
        match self {
            FilterValue::Empty => true,
            FilterValue::Scalar(s) => s.is_blank(),
            FilterValue::Range(start, end) => start.is_blank() && end.is_blank(),
            FilterValue::Multi(values) => values.iter().all(Scalar::is_blank),
        }
    }

    /// Converts this value into the shape `operator` expects.
    ///
    /// Only the structure changes; operands are never validated. `kind` is the
    /// column type when known; `in`/`notIn` produce a list only on `select`
    /// columns.
    pub fn coerce(self, operator: &FilterOperator, kind: Option<FilterKind>) -> Self {
        if operator.is_null_check() {
            return FilterValue::Empty;
        }
        if operator.is_range() {
            return match self {
                FilterValue::Empty => FilterValue::Empty,
                FilterValue::Scalar(s) => FilterValue::Range(s, Scalar::Text(String::new())),
                FilterValue::Range(a, b) => FilterValue::Range(a, b),
                FilterValue::Multi(values) => {
                    let mut it = values.into_iter();
                    match (it.next(), it.next()) {
                        (Some(a), Some(b)) => FilterValue::Range(a, b),
                        (Some(a), None) => FilterValue::Range(a, Scalar::Text(String::new())),
                        _ => FilterValue::Empty,
                    }
                }
            };
        }
        let wants_list = operator.is_multi() && kind.is_none_or(|k| k == FilterKind::Select);
        if wants_list {
            return match self {
                FilterValue::Empty => FilterValue::Multi(Vec::new()),
                FilterValue::Scalar(s) => FilterValue::Multi(vec![s]),
                FilterValue::Range(a, b) => FilterValue::Multi(vec![a, b]),
                FilterValue::Multi(values) => FilterValue::Multi(values),
            };
        }
        match self {
            FilterValue::Range(a, _) => FilterValue::Scalar(a),
            FilterValue::Multi(values) => values
                .into_iter()
                .next()
                .map(FilterValue::Scalar)
                .unwrap_or(FilterValue::Empty),
            other => other,
        }
    }

    /// Returns every operand in order.
    pub fn operands(&self) -> Vec<&Scalar> {
        match self {
            FilterValue::Empty => Vec::new(),
            FilterValue::Scalar(s) => vec![s],
            FilterValue::Range(a, b) => vec![a, b],
            FilterValue::Multi(values) => values.iter().collect(),
        }
    }
}

/// Loose wire representation of a [`FilterValue`].
#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum WireValue {
    Null(()),
    One(Scalar),
    Many(Vec<Scalar>),
}

impl From<WireValue> for FilterValue {
    fn from(wire: WireValue) -> Self {
        match wire {
            WireValue::Null(()) => FilterValue::Empty,
            WireValue::One(s) => FilterValue::Scalar(s),
            WireValue::Many(values) => FilterValue::Multi(values),
        }
    }
}

impl From<FilterValue> for WireValue {
    fn from(value: FilterValue) -> Self {
        match value {
            FilterValue::Empty => WireValue::Null(()),
            FilterValue::Scalar(s) => WireValue::One(s),
            FilterValue::Range(a, b) => WireValue::Many(vec![a, b]),
            FilterValue::Multi(values) => WireValue::Many(values),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values() {
        assert!(FilterValue::Empty.is_blank());
        assert!(FilterValue::scalar("").is_blank());
        assert!(FilterValue::Multi(vec![]).is_blank());
        assert!(FilterValue::range("", "").is_blank());
        assert!(!FilterValue::range("2024-01-01", "").is_blank());
        assert!(!FilterValue::scalar(0).is_blank());
    }

    #[test]
    fn test_coerce_between_keeps_pair() {
        let value = FilterValue::range("2024-01-01", "2024-01-31");
        let coerced = value.clone().coerce(&FilterOperator::Between, Some(FilterKind::Date));
        assert_eq!(coerced, value);

        let from_wire = FilterValue::multi(["2024-01-01", "2024-01-31"])
            .coerce(&FilterOperator::Between, Some(FilterKind::Date));
        assert_eq!(from_wire, value);
    }

    #[test]
    fn test_coerce_null_operator_drops_value() {
        let coerced = FilterValue::scalar("ignored").coerce(&FilterOperator::IsNull, None);
        assert_eq!(coerced, FilterValue::Empty);
    }

    #[test]
    fn test_coerce_in_depends_on_kind() {
        let select = FilterValue::scalar("a").coerce(&FilterOperator::In, Some(FilterKind::Select));
        assert_eq!(select, FilterValue::multi(["a"]));

        let text = FilterValue::multi(["a", "b"]).coerce(&FilterOperator::In, Some(FilterKind::Text));
        assert_eq!(text, FilterValue::scalar("a"));
    }

    #[test]
    fn test_loosely_equals() {
        assert!(Scalar::Number(2.0).loosely_equals(&Scalar::from("2")));
        assert!(Scalar::Bool(true).loosely_equals(&Scalar::from("true")));
        assert!(!Scalar::from("a").loosely_equals(&Scalar::from("A")));
    }

    #[test]
    fn test_wire_round_shapes() {
        let value: FilterValue = serde_json::from_str("null").unwrap();
        assert_eq!(value, FilterValue::Empty);
        let value: FilterValue = serde_json::from_str("[1, \"x\"]").unwrap();
        assert_eq!(value, FilterValue::Multi(vec![Scalar::Number(1.0), Scalar::from("x")]));
        assert_eq!(serde_json::to_string(&FilterValue::range("a", "b")).unwrap(), "[\"a\",\"b\"]");
    }
}
