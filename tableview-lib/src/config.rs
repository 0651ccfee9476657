//! Table configuration

use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::error::TableError;
use crate::view::ViewMode;

/// User-facing strings the engine places into projections.
///
/// The engine never translates; callers hand in already-localized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    /// Group label for rows with no value in any selected group column.
    pub ungrouped: String,
    /// Message of the empty-result projection.
    pub no_results: String,
    /// Fallback message of the error projection.
    pub error: String,
    /// Message of the loading projection.
    pub loading: String,
    /// Cell text for `true`.
    pub yes: String,
    /// Cell text for `false`.
    pub no: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            ungrouped: "Ungrouped".to_string(),
            no_results: "No results".to_string(),
            error: "Something went wrong".to_string(),
            loading: "Loading...".to_string(),
            yes: "Yes".to_string(),
            no: "No".to_string(),
        }
    }
}

/// Engine configuration.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use tableview_lib::config::TableConfig;
/// use tableview_lib::view::ViewMode;
///
/// let config = TableConfig::default()
///     .with_search_debounce(Duration::from_millis(400))
///     .with_default_view(ViewMode::Cards);
/// assert_eq!(config.card_fields, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Delay between the last keystroke and the committed search value.
    ///
    /// Default: 300 ms
    #[serde(rename = "search_debounce_ms", with = "millis")]
    pub search_debounce: Duration,

    /// View shown before any user toggle.
    ///
    /// Default: grid
    pub default_view: ViewMode,

    /// Number of extra fields shown on a card below its title.
    ///
    /// Default: 3
    pub card_fields: usize,

    /// Whether search/filter changes send the pager back to page 1.
    ///
    /// Default: true
    pub reset_page_on_change: bool,

    /// Localized strings.
    pub labels: Labels,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            search_debounce: Duration::from_millis(300),
            default_view: ViewMode::Grid,
            card_fields: 3,
            reset_page_on_change: true,
            labels: Labels::default(),
        }
    }
}

impl TableConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search debounce delay.
    pub fn with_search_debounce(mut self, delay: Duration) -> Self {
        self.search_debounce = delay;
        self
    }

    /// Sets the initial view.
    pub fn with_default_view(mut self, view: ViewMode) -> Self {
        self.default_view = view;
        self
    }

    /// Sets the number of card fields.
    pub fn with_card_fields(mut self, count: usize) -> Self {
        self.card_fields = count;
        self
    }

    /// Enables or disables the page reset on criteria change.
    pub fn with_reset_page_on_change(mut self, reset: bool) -> Self {
        self.reset_page_on_change = reset;
        self
    }

    /// Replaces the label set.
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Parses a JSON config; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that would produce an unusable projection.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.labels.ungrouped.trim().is_empty() {
            return Err(TableError::config("labels.ungrouped must not be empty"));
        }
        if self.default_view == ViewMode::Group {
            return Err(TableError::config("default_view must be grid or cards"));
        }
        Ok(())
    }
}

mod millis {
    use std::time::Duration;

    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
