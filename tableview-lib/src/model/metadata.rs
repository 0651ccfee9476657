//! Server-declared filter metadata

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::filter::FilterOperator;
use crate::filter::Scalar;

/// Value type of a filterable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    /// Free text.
    #[default]
    Text,
    /// One (or several, for `in`/`notIn`) of a fixed option list.
    Select,
    /// Calendar date (`YYYY-MM-DD`).
    Date,
    /// Number.
    Number,
    /// Boolean.
    Boolean,
}

/// One selectable option of a `select` column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOption {
    /// The value sent to the server / compared against cells.
    pub value: Scalar,
    /// The display label.
    pub label: String,
}

impl FilterOption {
    /// Creates a new option.
    pub fn new(value: impl Into<Scalar>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Filter metadata for a single column.
///
/// # Example
///
/// ```
/// use tableview_lib::filter::FilterOperator;
/// use tableview_lib::model::{FilterDefinition, FilterKind, FilterOption};
///
/// let status = FilterDefinition::new("status", FilterKind::Select)
///     .with_label("Status")
///     .with_operators([FilterOperator::Equals, FilterOperator::In])
///     .with_option(FilterOption::new("active", "Active"));
///
/// assert_eq!(status.first_operator(), Some(&FilterOperator::Equals));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterDefinition {
    /// Column id the filter applies to.
    pub column: String,

    /// Display label; falls back to the column id.
    #[serde(default)]
    pub label: Option<String>,

    /// Value type of the column.
    #[serde(rename = "type", default)]
    pub kind: FilterKind,

    /// Allowed operators, in display order.
    #[serde(default)]
    pub operators: Vec<FilterOperator>,

    /// Options for `select` columns.
    #[serde(default)]
    pub options: Vec<FilterOption>,
}

impl FilterDefinition {
    /// Creates a definition with no operators or options.
    pub fn new(column: impl Into<String>, kind: FilterKind) -> Self {
        Self {
            column: column.into(),
            label: None,
            kind,
            operators: Vec::new(),
            options: Vec::new(),
        }
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the allowed operators.
    pub fn with_operators(mut self, operators: impl IntoIterator<Item = FilterOperator>) -> Self {
        self.operators = operators.into_iter().collect();
        self
    }

    /// Adds a selectable option.
    pub fn with_option(mut self, option: FilterOption) -> Self {
        self.options.push(option);
        self
    }

    /// Returns the display label, or the column id if none was declared.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.column)
    }

    /// Returns the first declared operator, used when a draft switches to this column.
    pub fn first_operator(&self) -> Option<&FilterOperator> {
        self.operators.first()
    }

    /// Looks up the label of an option value.
    pub fn option_label(&self, value: &Scalar) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.value.loosely_equals(value))
            .map(|o| o.label.as_str())
    }
}

/// Table-level metadata supplied by the data source.
///
/// Its presence enables the advanced filter builder; when `filters` is empty
/// the builder reports [`CapabilityError::NoFilterMetadata`](crate::error::CapabilityError).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableMetadata {
    /// Filterable columns.
    #[serde(default)]
    pub filters: Vec<FilterDefinition>,

    /// Operator display labels.
    #[serde(default)]
    pub operator_labels: BTreeMap<FilterOperator, String>,
}

impl TableMetadata {
    /// Creates metadata from a list of filter definitions.
    pub fn new(filters: impl IntoIterator<Item = FilterDefinition>) -> Self {
        Self {
            filters: filters.into_iter().collect(),
            operator_labels: BTreeMap::new(),
        }
    }

    /// Sets the display label for an operator.
    pub fn with_operator_label(mut self, operator: FilterOperator, label: impl Into<String>) -> Self {
        self.operator_labels.insert(operator, label.into());
        self
    }

    /// Returns `true` if at least one column is filterable.
    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty()
    }

    /// Returns the filter definition for a column.
    pub fn definition(&self, column: &str) -> Option<&FilterDefinition> {
        self.filters.iter().find(|f| f.column == column)
    }

    /// Returns the display label of an operator, falling back to its built-in label.
    pub fn operator_label<'a>(&'a self, operator: &'a FilterOperator) -> &'a str {
        self.operator_labels
            .get(operator)
            .map(String::as_str)
            .unwrap_or_else(|| operator.default_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_server_metadata() {
        let json = r#"{
            "filters": [
                {
                    "column": "status",
                    "label": "Status",
                    "type": "select",
                    "operators": ["equals", "in", "isNull"],
                    "options": [
                        {"value": "active", "label": "Active"},
                        {"value": 2, "label": "Archived"}
                    ]
                },
                {"column": "created_at", "type": "date", "operators": ["between"]}
            ],
            "operatorLabels": {"equals": "is", "between": "between"}
        }"#;
        let metadata: TableMetadata = serde_json::from_str(json).unwrap();

        let status = metadata.definition("status").unwrap();
        assert_eq!(status.kind, FilterKind::Select);
        assert_eq!(status.operators.len(), 3);
        assert_eq!(status.option_label(&Scalar::Number(2.0)), Some("Archived"));

        let created = metadata.definition("created_at").unwrap();
        assert_eq!(created.label(), "created_at");
        assert_eq!(metadata.operator_label(&FilterOperator::Equals), "is");
        assert_eq!(metadata.operator_label(&FilterOperator::IsNull), "is empty");
    }

    #[test]
    fn test_empty_metadata_has_no_filters() {
        assert!(!TableMetadata::default().has_filters());
    }
}
