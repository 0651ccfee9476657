//! Metadata-driven filter builder

use log::trace;

use super::apply_filters;
use super::ActiveFilter;
use super::FilterDraft;
use super::FilterOperator;
use super::FilterValue;
use crate::error::CapabilityError;
use crate::model::FilterKind;
use crate::model::FilterOption;
use crate::model::TableMetadata;

/// Which value input a draft needs for its current column and operator.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueInput<'a> {
    /// No column chosen yet, or a presence check: value entry is disabled.
    Disabled,
    /// A single value of the given kind.
    Single(FilterKind),
    /// A single option out of a list.
    Select(&'a [FilterOption]),
    /// A `[start, end]` pair of the given kind.
    Range(FilterKind),
    /// Several options out of a list.
    MultiSelect(&'a [FilterOption]),
}

/// Editable list of filter drafts backed by server metadata.
///
/// The builder only exists when the metadata declares at least one filterable
/// column; [`FilterBuilder::open`] returns
/// [`CapabilityError::NoFilterMetadata`] otherwise and the caller shows an
/// inert state instead.
///
/// # Example
///
/// ```
/// use tableview_lib::filter::{FilterBuilder, FilterOperator, FilterValue};
/// use tableview_lib::model::{FilterDefinition, FilterKind, TableMetadata};
///
/// let metadata = TableMetadata::new([FilterDefinition::new("name", FilterKind::Text)
///     .with_operators([FilterOperator::Contains, FilterOperator::Equals])]);
///
/// let mut builder = FilterBuilder::open(Some(&metadata), &[]).unwrap();
/// let id = builder.drafts()[0].id.clone();
/// builder.set_column(&id, "name").unwrap();
/// builder.set_value(&id, FilterValue::scalar("ada"));
///
/// let filters = builder.apply();
/// assert_eq!(filters[0].operator, FilterOperator::Contains);
/// ```
#[derive(Debug, Clone)]
pub struct FilterBuilder<'a> {
    metadata: &'a TableMetadata,
    drafts: Vec<FilterDraft>,
}

impl<'a> FilterBuilder<'a> {
    /// Opens the builder, seeded with the currently active filters (or one
    /// blank draft when there are none).
    pub fn open(metadata: Option<&'a TableMetadata>, active: &[ActiveFilter]) -> Result<Self, CapabilityError> {
        let metadata = match metadata {
            Some(m) if m.has_filters() => m,
            _ => return Err(CapabilityError::NoFilterMetadata),
        };

        let mut drafts: Vec<FilterDraft> = active
            .iter()
            .map(|f| {
                let mut draft = FilterDraft::from(f);
                draft.kind = metadata.definition(&f.column).map(|d| d.kind);
                draft
            })
            .collect();
        if drafts.is_empty() {
            drafts.push(FilterDraft::blank());
        }

        Ok(Self { metadata, drafts })
    }

    /// Returns the drafts in order.
    pub fn drafts(&self) -> &[FilterDraft] {
        &self.drafts
    }

    /// Returns a draft by id.
    pub fn draft(&self, id: &str) -> Option<&FilterDraft> {
        self.drafts.iter().find(|d| d.id == id)
    }

    /// Returns `(column, label)` for every filterable column.
    pub fn columns(&self) -> Vec<(&str, &str)> {
        self.metadata
            .filters
            .iter()
            .map(|f| (f.column.as_str(), f.label()))
            .collect()
    }

    /// Returns `(operator, label)` for every operator declared on `column`.
    pub fn operators_for(&self, column: &str) -> Vec<(&FilterOperator, &str)> {
        self.metadata
            .definition(column)
            .map(|def| {
                def.operators
                    .iter()
                    .map(|op| (op, self.metadata.operator_label(op)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Appends a blank draft and returns its id.
    pub fn add_draft(&mut self) -> String {
        let draft = FilterDraft::blank();
        let id = draft.id.clone();
        self.drafts.push(draft);
        id
    }

    /// Removes a draft. Returns `true` if it existed.
    pub fn remove_draft(&mut self, id: &str) -> bool {
        let before = self.drafts.len();
        self.drafts.retain(|d| d.id != id);
        self.drafts.len() != before
    }

    /// Drops every draft and starts over with a single blank one.
    pub fn reset(&mut self) {
        self.drafts = vec![FilterDraft::blank()];
    }

    /// Points a draft at another column.
    ///
    /// The operator resets to the first operator declared for the new column
    /// and the value is cleared, so no stale operator/value pair from the
    /// previous column survives.
    pub fn set_column(&mut self, id: &str, column: &str) -> Result<(), CapabilityError> {
        let def = self
            .metadata
            .definition(column)
            .ok_or_else(|| CapabilityError::unknown_column(column))?;
        if let Some(draft) = self.drafts.iter_mut().find(|d| d.id == id) {
            trace!("Draft {} column {:?} -> {:?}", id, draft.column, column);
            draft.column = column.to_string();
            draft.operator = def.first_operator().cloned();
            draft.value = FilterValue::Empty;
            draft.kind = Some(def.kind);
        }
        Ok(())
    }

    /// Changes a draft's operator, reshaping its value accordingly.
    pub fn set_operator(&mut self, id: &str, operator: FilterOperator) {
        if let Some(draft) = self.drafts.iter_mut().find(|d| d.id == id) {
            let value = std::mem::take(&mut draft.value);
            draft.value = value.coerce(&operator, draft.kind);
            draft.operator = Some(operator);
        }
    }

    /// Sets a draft's value, reshaped for its operator.
    ///
    /// Ignored while the operator is a presence check: value entry is disabled.
    pub fn set_value(&mut self, id: &str, value: FilterValue) {
        if let Some(draft) = self.drafts.iter_mut().find(|d| d.id == id) {
            draft.value = match &draft.operator {
                Some(op) => value.coerce(op, draft.kind),
                None => value,
            };
        }
    }

    /// Describes the value input to show for a draft.
    pub fn value_input(&self, id: &str) -> ValueInput<'a> {
        let metadata: &'a TableMetadata = self.metadata;
        let Some(draft) = self.draft(id) else {
            return ValueInput::Disabled;
        };
        let Some(def) = metadata.definition(&draft.column) else {
            return ValueInput::Disabled;
        };
        match &draft.operator {
            None => ValueInput::Disabled,
            Some(op) if op.is_null_check() => ValueInput::Disabled,
            Some(op) if op.is_range() => ValueInput::Range(def.kind),
            Some(op) if op.is_multi() && def.kind == FilterKind::Select => {
                ValueInput::MultiSelect(&def.options)
            }
            Some(_) if def.kind == FilterKind::Select => ValueInput::Select(&def.options),
            Some(_) => ValueInput::Single(def.kind),
        }
    }

    /// Commits the drafts; see [`apply_filters`].
    pub fn apply(&self) -> Vec<ActiveFilter> {
        apply_filters(&self.drafts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FilterDefinition;

    fn metadata() -> TableMetadata {
        TableMetadata::new([
            FilterDefinition::new("status", FilterKind::Select)
                .with_label("Status")
                .with_operators([FilterOperator::In, FilterOperator::Equals, FilterOperator::IsNull])
                .with_option(FilterOption::new("active", "Active"))
                .with_option(FilterOption::new("inactive", "Inactive")),
            FilterDefinition::new("created_at", FilterKind::Date)
                .with_operators([FilterOperator::Between, FilterOperator::After]),
        ])
    }

    #[test]
    fn test_open_without_metadata_is_capability_error() {
        assert_eq!(
            FilterBuilder::open(None, &[]).unwrap_err(),
            CapabilityError::NoFilterMetadata
        );
        let empty = TableMetadata::default();
        assert!(FilterBuilder::open(Some(&empty), &[]).is_err());
    }

    #[test]
    fn test_open_seeds_blank_draft() {
        let metadata = metadata();
        let builder = FilterBuilder::open(Some(&metadata), &[]).unwrap();
        assert_eq!(builder.drafts().len(), 1);
        assert_eq!(builder.value_input(&builder.drafts()[0].id), ValueInput::Disabled);
    }

    #[test]
    fn test_column_change_resets_operator_and_value() {
        let metadata = metadata();
        let mut builder = FilterBuilder::open(Some(&metadata), &[]).unwrap();
        let id = builder.drafts()[0].id.clone();

        builder.set_column(&id, "status").unwrap();
        builder.set_value(&id, FilterValue::multi(["active"]));
        assert_eq!(builder.draft(&id).unwrap().operator, Some(FilterOperator::In));

        builder.set_column(&id, "created_at").unwrap();
        let draft = builder.draft(&id).unwrap();
        assert_eq!(draft.operator, Some(FilterOperator::Between));
        assert_eq!(draft.value, FilterValue::Empty);
        assert_eq!(builder.value_input(&id), ValueInput::Range(FilterKind::Date));
    }

    #[test]
    fn test_unknown_column_is_rejected() {
        let metadata = metadata();
        let mut builder = FilterBuilder::open(Some(&metadata), &[]).unwrap();
        let id = builder.drafts()[0].id.clone();
        assert_eq!(
            builder.set_column(&id, "salary"),
            Err(CapabilityError::unknown_column("salary"))
        );
    }

    #[test]
    fn test_value_input_per_operator() {
        let metadata = metadata();
        let mut builder = FilterBuilder::open(Some(&metadata), &[]).unwrap();
        let id = builder.drafts()[0].id.clone();
        builder.set_column(&id, "status").unwrap();
        assert!(matches!(builder.value_input(&id), ValueInput::MultiSelect(opts) if opts.len() == 2));

        builder.set_operator(&id, FilterOperator::Equals);
        assert!(matches!(builder.value_input(&id), ValueInput::Select(_)));

        builder.set_operator(&id, FilterOperator::IsNull);
        assert_eq!(builder.value_input(&id), ValueInput::Disabled);
    }

    #[test]
    fn test_apply_skips_unfinished_drafts() {
        let metadata = metadata();
        let mut builder = FilterBuilder::open(Some(&metadata), &[]).unwrap();
        let first = builder.drafts()[0].id.clone();
        builder.set_column(&first, "status").unwrap();
        builder.set_value(&first, FilterValue::scalar("active"));
        builder.add_draft();

        let applied = builder.apply();
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].value, FilterValue::multi(["active"]));
    }

    #[test]
    fn test_open_with_active_filters_edits_them() {
        let metadata = metadata();
        let active = vec![ActiveFilter::new("status", "isNull", FilterValue::Empty)];
        let mut builder = FilterBuilder::open(Some(&metadata), &active).unwrap();
        assert_eq!(builder.drafts().len(), 1);
        assert_eq!(builder.drafts()[0].kind, Some(FilterKind::Select));

        assert!(builder.remove_draft(&active[0].id));
        assert!(builder.apply().is_empty());
    }
}
