//! Filter operators

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// A filter comparison operator.
///
/// Operators are declared per column by the server metadata and travel as
/// strings. Known names (and their symbolic aliases such as `=` or `>=`) map
/// to typed variants; anything else is preserved as [`FilterOperator::Other`]
/// so it can still be forwarded to a server that understands it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilterOperator {
    /// `equals` / `=`
    Equals,
    /// `notEquals` / `!=`
    NotEquals,
    /// `contains`
    Contains,
    /// `notContains`
    NotContains,
    /// `startsWith`
    StartsWith,
    /// `endsWith`
    EndsWith,
    /// `gt` / `>`
    GreaterThan,
    /// `gte` / `>=`
    GreaterOrEqual,
    /// `lt` / `<`
    LessThan,
    /// `lte` / `<=`
    LessOrEqual,
    /// `between` (inclusive range)
    Between,
    /// `in` (any of)
    In,
    /// `notIn` (none of)
    NotIn,
    /// `isNull`
    IsNull,
    /// `isNotNull`
    IsNotNull,
    /// `before` (dates)
    Before,
    /// `after` (dates)
    After,
    /// Operator unknown to the engine, forwarded as-is.
    Other(String),
}

impl FilterOperator {
    /// Parses an operator name, accepting symbolic aliases.
    pub fn parse(name: &str) -> Self {
        match name {
            "equals" | "eq" | "=" | "==" => Self::Equals,
            "notEquals" | "ne" | "!=" | "<>" => Self::NotEquals,
            "contains" | "like" => Self::Contains,
            "notContains" => Self::NotContains,
            "startsWith" => Self::StartsWith,
            "endsWith" => Self::EndsWith,
            "gt" | ">" => Self::GreaterThan,
            "gte" | "ge" | ">=" => Self::GreaterOrEqual,
            "lt" | "<" => Self::LessThan,
            "lte" | "le" | "<=" => Self::LessOrEqual,
            "between" => Self::Between,
            "in" => Self::In,
            "notIn" => Self::NotIn,
            "isNull" => Self::IsNull,
            "isNotNull" => Self::IsNotNull,
            "before" => Self::Before,
            "after" => Self::After,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the canonical wire name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "notEquals",
            Self::Contains => "contains",
            Self::NotContains => "notContains",
            Self::StartsWith => "startsWith",
            Self::EndsWith => "endsWith",
            Self::GreaterThan => "gt",
            Self::GreaterOrEqual => "gte",
            Self::LessThan => "lt",
            Self::LessOrEqual => "lte",
            Self::Between => "between",
            Self::In => "in",
            Self::NotIn => "notIn",
            Self::IsNull => "isNull",
            Self::IsNotNull => "isNotNull",
            Self::Before => "before",
            Self::After => "after",
            Self::Other(name) => name,
        }
    }

    /// Label used when the metadata does not provide one.
    pub fn default_label(&self) -> &str {
        match self {
            Self::Equals => "is",
            Self::NotEquals => "is not",
            Self::Contains => "contains",
            Self::NotContains => "does not contain",
            Self::StartsWith => "starts with",
            Self::EndsWith => "ends with",
            Self::GreaterThan => ">",
            Self::GreaterOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessOrEqual => "<=",
            Self::Between => "between",
            Self::In => "is any of",
            Self::NotIn => "is none of",
            Self::IsNull => "is empty",
            Self::IsNotNull => "is not empty",
            Self::Before => "before",
            Self::After => "after",
            Self::Other(name) => name,
        }
    }

    /// Operators that test for presence and take no value.
    pub fn is_null_check(&self) -> bool {
        matches!(self, Self::IsNull | Self::IsNotNull)
    }

    /// Operators whose value is a `[start, end]` pair.
    pub fn is_range(&self) -> bool {
        matches!(self, Self::Between)
    }

    /// Operators whose value is a list on `select` columns.
    pub fn is_multi(&self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }
}

impl From<String> for FilterOperator {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<&str> for FilterOperator {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl From<FilterOperator> for String {
    fn from(op: FilterOperator) -> Self {
        op.as_str().to_string()
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
