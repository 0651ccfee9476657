//! Table state controller
//!
//! Composition root of the engine. Holds every axis of table state, forwards
//! intents for axes owned by the caller, and derives the processed rows and
//! the active [`View`] on demand. All state transitions are synchronous; the
//! only async entry points are the debounced search commit and bulk actions.

use std::sync::Arc;

use log::debug;
use log::warn;
use serde::Serialize;
use tokio::time::Instant;

use crate::config::TableConfig;
use crate::error::CapabilityError;
use crate::error::TableError;
use crate::events::BulkActionHandler;
use crate::events::BulkOutcome;
use crate::events::TableEvents;
use crate::filter;
use crate::filter::ActiveFilter;
use crate::filter::FilterBuilder;
use crate::filter::FilterChip;
use crate::filter::FilterDraft;
use crate::group;
use crate::model::find_column;
use crate::model::GroupableColumn;
use crate::model::TableColumn;
use crate::model::TableMetadata;
use crate::model::TableRow;
use crate::owned::Owned;
use crate::page::PageInfo;
use crate::selection;
use crate::sort;
use crate::sort::SortConfig;
use crate::toolbar::search_rows;
use crate::toolbar::ColumnVisibility;
use crate::toolbar::SearchBox;
use crate::view::CellRenderer;
use crate::view::CellRenderers;
use crate::view::CustomRenderer;
use crate::view::Projector;
use crate::view::View;
use crate::view::ViewMode;

/// Load state of the row source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DataStatus {
    #[default]
    Ready,
    Loading,
    Error {
        message: Option<String>,
    },
}

impl DataStatus {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: Some(message.into()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// Row-count display for the table header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSummary {
    /// Logical row count: the server total when paginated, else the number
    /// of processed rows.
    pub total: usize,
    pub selected: usize,
    pub page: Option<PageInfo>,
}

/// Inputs of a [`TableController`].
///
/// # Example
///
/// ```
/// use tableview_lib::controller::TableProps;
/// use tableview_lib::model::{TableColumn, TableRow};
/// use tableview_lib::page::PageInfo;
///
/// let props = TableProps::new(vec![TableRow::new("1")], vec![TableColumn::new("name", "Name")])
///     .with_controlled_search("ada", |query: &String| println!("search: {query}"))
///     .with_page(PageInfo::new(1, 3, 10).with_total(25));
/// assert!(props.search.is_controlled());
/// assert!(!props.filters.is_controlled());
/// ```
pub struct TableProps {
    pub rows: Vec<TableRow>,
    pub columns: Vec<TableColumn>,
    pub metadata: Option<TableMetadata>,
    pub groupable_columns: Option<Vec<GroupableColumn>>,
    pub hidden_columns: Vec<String>,
    pub search: Owned<String>,
    pub filters: Owned<Vec<ActiveFilter>>,
    pub page: Option<PageInfo>,
    pub status: DataStatus,
}

impl TableProps {
    /// Uncontrolled table over `rows` and `columns`.
    pub fn new(rows: Vec<TableRow>, columns: Vec<TableColumn>) -> Self {
        Self {
            rows,
            columns,
            metadata: None,
            groupable_columns: None,
            hidden_columns: Vec::new(),
            search: Owned::internal(String::new()),
            filters: Owned::internal(Vec::new()),
            page: None,
            status: DataStatus::Ready,
        }
    }

    pub fn with_metadata(mut self, metadata: TableMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_groupable_columns(mut self, columns: Vec<GroupableColumn>) -> Self {
        self.groupable_columns = Some(columns);
        self
    }

    pub fn with_hidden_columns(mut self, ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.hidden_columns = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Initial search text of an uncontrolled search axis.
    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search = Owned::internal(query.into());
        self
    }

    /// Initial filters of an uncontrolled filter axis.
    pub fn with_filters(mut self, filters: Vec<ActiveFilter>) -> Self {
        self.filters = Owned::internal(filters);
        self
    }

    /// Hands the search axis to the caller.
    pub fn with_controlled_search(
        mut self,
        query: impl Into<String>,
        on_change: impl Fn(&String) + Send + Sync + 'static,
    ) -> Self {
        self.search = Owned::external(query.into(), on_change);
        self
    }

    /// Hands the filter axis to the caller.
    pub fn with_controlled_filters(
        mut self,
        filters: Vec<ActiveFilter>,
        on_change: impl Fn(&Vec<ActiveFilter>) + Send + Sync + 'static,
    ) -> Self {
        self.filters = Owned::external(filters, on_change);
        self
    }

    pub fn with_page(mut self, page: PageInfo) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_status(mut self, status: DataStatus) -> Self {
        self.status = status;
        self
    }
}

/// The table engine.
///
/// Selection is stored on the rows; every other axis is a field here. Search
/// and filters are [`Owned`] axes: when the caller controls one, requests are
/// forwarded and the engine assumes the rows it receives are already
/// filtered.
pub struct TableController {
    rows: Vec<TableRow>,
    columns: Vec<TableColumn>,
    metadata: Option<TableMetadata>,
    groupable: Option<Vec<GroupableColumn>>,
    search: Owned<String>,
    search_box: SearchBox,
    filters: Owned<Vec<ActiveFilter>>,
    sort: Option<SortConfig>,
    group_columns: Vec<String>,
    visibility: ColumnVisibility,
    view_mode: ViewMode,
    resume_view: ViewMode,
    page: Option<PageInfo>,
    status: DataStatus,
    config: TableConfig,
    renderers: CellRenderers,
    custom: Option<Arc<dyn CustomRenderer>>,
    events: Option<Arc<dyn TableEvents>>,
}

impl TableController {
    pub fn new(props: TableProps) -> Self {
        let config = TableConfig::default();
        let search_box = SearchBox::new(props.search.value().clone(), config.search_debounce);
        let visibility = ColumnVisibility::with_hidden(props.hidden_columns, &props.columns);

        let mut table = Self {
            rows: props.rows,
            columns: props.columns,
            metadata: props.metadata,
            groupable: props.groupable_columns,
            search: props.search,
            search_box,
            filters: props.filters,
            sort: None,
            group_columns: Vec::new(),
            visibility,
            view_mode: config.default_view,
            resume_view: config.default_view,
            page: props.page,
            status: props.status,
            config,
            renderers: CellRenderers::new(),
            custom: None,
            events: None,
        };

        for id in group::default_groups(table.groupable.as_deref()) {
            table.toggle_group(&id);
        }
        debug!(
            "Table created: {} rows, {} columns, search {}, filters {}",
            table.rows.len(),
            table.columns.len(),
            if table.search.is_controlled() { "controlled" } else { "local" },
            if table.filters.is_controlled() { "controlled" } else { "local" },
        );
        table
    }

    /// Replaces the configuration. The default view only applies while the
    /// table is not grouped.
    pub fn with_config(mut self, config: TableConfig) -> Self {
        self.search_box = SearchBox::new(self.search.value().clone(), config.search_debounce);
        if self.view_mode == ViewMode::Group {
            self.resume_view = config.default_view;
        } else {
            self.view_mode = config.default_view;
        }
        self.config = config;
        self
    }

    pub fn with_events(mut self, events: impl TableEvents + 'static) -> Self {
        self.events = Some(Arc::new(events));
        self
    }

    /// Registers a custom renderer for the cells of one column.
    pub fn with_cell_renderer(mut self, column: impl Into<String>, renderer: impl CellRenderer + 'static) -> Self {
        self.renderers.register(column, renderer);
        self
    }

    /// Replaces every built-in view with caller-supplied rendering.
    pub fn with_custom_renderer(mut self, renderer: impl CustomRenderer + 'static) -> Self {
        self.custom = Some(Arc::new(renderer));
        self
    }

    // ---- inputs from the data provider ----

    /// Supplies a fresh row set and schema.
    ///
    /// Selection carries over by row id. A sort or group column that is no
    /// longer in the schema is dropped.
    pub fn set_data(&mut self, rows: Vec<TableRow>, columns: Vec<TableColumn>) {
        self.columns = columns;
        self.set_rows(rows);
        self.enforce_schema();
    }

    /// Supplies a fresh row set for an unchanged schema.
    pub fn set_rows(&mut self, rows: Vec<TableRow>) {
        self.rows = selection::reconcile(rows, &self.rows);
        debug!("Rows replaced: {} rows, {} selected", self.rows.len(), self.selected_count());
    }

    pub fn set_metadata(&mut self, metadata: Option<TableMetadata>) {
        self.metadata = metadata;
    }

    pub fn set_status(&mut self, status: DataStatus) {
        self.status = status;
    }

    pub fn set_page(&mut self, page: Option<PageInfo>) {
        self.page = page;
    }

    /// Adopts a search value pushed down by the owner.
    pub fn sync_search(&mut self, query: impl Into<String>) {
        let query = query.into();
        self.search_box.set_committed(query.clone());
        self.search.sync(query);
    }

    /// Adopts a filter list pushed down by the owner.
    pub fn sync_filters(&mut self, filters: Vec<ActiveFilter>) {
        self.filters.sync(filters);
    }

    // ---- search ----

    /// Committed search text.
    pub fn search(&self) -> &str {
        self.search.value()
    }

    /// Text currently in the search input.
    pub fn search_draft(&self) -> &str {
        self.search_box.draft()
    }

    /// Records a keystroke. The value is committed once typing pauses.
    pub fn search_input(&mut self, text: impl Into<String>) {
        self.search_box.input(text);
    }

    /// Commits the pending search if its debounce elapsed by `now`.
    /// Returns `true` if a new value was committed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.search_box.tick(now) {
            Some(query) => self.commit_search(query),
            None => false,
        }
    }

    /// Waits out the debounce and commits the pending search.
    pub async fn settle_search(&mut self) -> bool {
        match self.search_box.settle().await {
            Some(query) => self.commit_search(query),
            None => false,
        }
    }

    /// Commits the pending search immediately.
    pub fn flush_search(&mut self) -> bool {
        match self.search_box.flush() {
            Some(query) => self.commit_search(query),
            None => false,
        }
    }

    pub fn clear_search(&mut self) -> bool {
        match self.search_box.clear() {
            Some(query) => self.commit_search(query),
            None => false,
        }
    }

    pub fn set_search_enabled(&mut self, enabled: bool) {
        if enabled {
            self.search_box.enable();
        } else {
            self.search_box.disable();
        }
    }

    fn commit_search(&mut self, query: String) -> bool {
        self.search.request(query);
        self.reset_page();
        true
    }

    // ---- filters ----

    pub fn filters(&self) -> &[ActiveFilter] {
        self.filters.value()
    }

    pub fn metadata(&self) -> Option<&TableMetadata> {
        self.metadata.as_ref()
    }

    /// Opens the advanced filter builder seeded with the active filters.
    pub fn open_filter_builder(&self) -> Result<FilterBuilder<'_>, CapabilityError> {
        FilterBuilder::open(self.metadata.as_ref(), self.filters.value())
    }

    /// Commits a set of drafts; incomplete drafts are dropped.
    pub fn apply_filters(&mut self, drafts: &[FilterDraft]) -> Vec<ActiveFilter> {
        let filters = filter::apply_filters(drafts);
        self.commit_filters(filters.clone());
        filters
    }

    /// Commits an already-built filter list (e.g. from [`FilterBuilder::apply`]).
    pub fn commit_filters(&mut self, filters: Vec<ActiveFilter>) {
        debug!("Filters committed: {}", filters.len());
        self.filters.request(filters);
        self.reset_page();
    }

    /// Removes one filter. Returns `false` if no filter has that id.
    pub fn remove_filter(&mut self, id: &str) -> bool {
        if !self.filters.value().iter().any(|f| f.id == id) {
            return false;
        }
        let filters = filter::remove_filter(self.filters.value(), id);
        self.commit_filters(filters);
        true
    }

    pub fn clear_filters(&mut self) {
        if !self.filters.value().is_empty() {
            self.commit_filters(filter::clear_filters());
        }
    }

    /// Labels of the active filters for the summary bar.
    pub fn filter_chips(&self) -> Vec<FilterChip> {
        filter::filter_chips(self.filters.value(), self.metadata.as_ref())
    }

    // ---- sort ----

    pub fn sort(&self) -> Option<&SortConfig> {
        self.sort.as_ref()
    }

    /// Cycles the sort of a visible, sortable column. Other columns are
    /// ignored.
    pub fn toggle_sort(&mut self, column: &str) -> Option<&SortConfig> {
        let sortable = find_column(&self.columns, column).is_some_and(|c| c.sortable);
        if sortable && self.visibility.is_visible(column) {
            self.sort = sort::toggle_sort(column, self.sort.as_ref());
            debug!("Sort is now {:?}", self.sort);
        }
        self.sort.as_ref()
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    // ---- grouping ----

    /// Selected group columns, in selection order.
    pub fn group_columns(&self) -> &[String] {
        &self.group_columns
    }

    /// Columns that may be grouped by.
    pub fn groupable_columns(&self) -> Vec<String> {
        group::eligible_columns(&self.columns, self.groupable.as_deref())
    }

    /// Adds or removes a group column, moving in and out of the group view.
    /// Returns `false` if the column is not groupable or hidden.
    pub fn toggle_group(&mut self, column: &str) -> bool {
        let grouped = self.group_columns.iter().any(|c| c == column);
        if !grouped && (!self.groupable_columns().iter().any(|c| c == column) || !self.visibility.is_visible(column)) {
            return false;
        }

        let before = self.group_columns.len();
        group::toggle_group(&mut self.group_columns, column);
        let after = self.group_columns.len();

        if before == 0 && self.view_mode != ViewMode::Group {
            self.resume_view = self.view_mode;
        }
        self.view_mode = self.view_mode.after_group_change(before, after, self.resume_view);
        true
    }

    // ---- columns & view ----

    pub fn columns(&self) -> &[TableColumn] {
        &self.columns
    }

    /// Columns currently shown, in schema order.
    pub fn visible_columns(&self) -> Vec<TableColumn> {
        self.visibility.visible(&self.columns)
    }

    pub fn is_column_visible(&self, column: &str) -> bool {
        self.visibility.is_visible(column)
    }

    /// Shows or hides a column. Hiding the sorted column clears the sort and
    /// hiding a grouped column ungroups it.
    pub fn toggle_column(&mut self, column: &str) -> bool {
        let changed = self.visibility.toggle(column, &self.columns);
        if changed {
            self.enforce_schema();
        }
        changed
    }

    pub fn show_all_columns(&mut self) {
        self.visibility.show_all();
    }

    /// Restores the initially hidden columns and their natural widths.
    pub fn reset_columns(&mut self) {
        self.visibility.reset(&self.columns);
        self.enforce_schema();
    }

    /// Resizes a column, clamped to the minimum width. Returns the applied
    /// width, or `None` if the column can't be resized.
    pub fn resize_column(&mut self, column: &str, width: u16) -> Option<u16> {
        self.visibility.resize(column, width, &self.columns)
    }

    pub fn column_width(&self, column: &str) -> Option<u16> {
        self.visibility.width(column)
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// The grid/cards toggle. Does nothing while grouped.
    pub fn toggle_view(&mut self) -> ViewMode {
        self.view_mode = self.view_mode.toggled();
        self.view_mode
    }

    /// Drops sort and group columns that are gone from the schema or hidden.
    fn enforce_schema(&mut self) {
        let usable = |id: &str, columns: &[TableColumn], visibility: &ColumnVisibility| {
            find_column(columns, id).is_some() && visibility.is_visible(id)
        };

        if let Some(sort) = &self.sort
            && !usable(&sort.column, &self.columns, &self.visibility)
        {
            debug!("Clearing sort on unavailable column {}", sort.column);
            self.sort = None;
        }

        let stale: Vec<String> = self
            .group_columns
            .iter()
            .filter(|id| !usable(id, &self.columns, &self.visibility))
            .cloned()
            .collect();
        for id in stale {
            debug!("Ungrouping unavailable column {id}");
            self.toggle_group(&id);
        }
    }

    // ---- selection ----

    /// Flips the selection of one row.
    pub fn toggle_row(&mut self, id: &str) -> bool {
        selection::toggle_row(&mut self.rows, id)
    }

    /// Selects or deselects every row on the current page. Rows on other
    /// pages are never touched.
    pub fn toggle_all(&mut self, selected: bool) {
        let scope = self.page_ids();
        selection::toggle_all(&mut self.rows, selected, &scope);
    }

    /// Header checkbox state for the current page.
    pub fn all_selected(&self) -> bool {
        selection::all_selected(&self.rows, &self.page_ids())
    }

    pub fn selected_ids(&self) -> Vec<String> {
        selection::selected_ids(&self.rows)
    }

    pub fn selected_count(&self) -> usize {
        selection::count(&self.rows)
    }

    // ---- intents ----

    fn emit(&self, intent: impl FnOnce(&dyn TableEvents)) {
        if let Some(events) = &self.events {
            intent(events.as_ref());
        }
    }

    pub fn row_click(&self, id: &str) {
        self.emit(|e| e.on_row_click(id));
    }

    pub fn edit(&self, id: &str) {
        self.emit(|e| e.on_edit(id));
    }

    pub fn delete(&self, id: &str) {
        self.emit(|e| e.on_delete(id));
    }

    pub fn add(&self) {
        self.emit(|e| e.on_add_click());
    }

    /// Forwards the selected ids to the bulk-action intent.
    pub fn bulk_action(&self) {
        let ids = self.selected_ids();
        if !ids.is_empty() {
            self.emit(|e| e.on_bulk_action(&ids));
        }
    }

    /// Runs an async action over the selected rows.
    ///
    /// Asks for confirmation first; on success the affected rows are
    /// deselected. Handler errors are returned unchanged and leave the
    /// selection as it was.
    pub async fn run_bulk_action(&mut self, handler: &dyn BulkActionHandler) -> Result<BulkOutcome, TableError> {
        let ids = self.selected_ids();
        if ids.is_empty() {
            return Ok(BulkOutcome::NothingSelected);
        }
        if !handler.confirm(&ids).await {
            debug!("Bulk action over {} rows cancelled", ids.len());
            return Ok(BulkOutcome::Cancelled);
        }

        if let Err(e) = handler.execute(ids.clone()).await {
            warn!("Bulk action over {} rows failed: {}", ids.len(), e);
            return Err(e.into());
        }
        selection::deselect(&mut self.rows, &ids);
        Ok(BulkOutcome::Completed { count: ids.len() })
    }

    pub fn next_page(&self) {
        if self.page.is_some_and(|p| p.has_next()) {
            self.emit(|e| e.go_to_next_page());
        }
    }

    pub fn previous_page(&self) {
        if self.page.is_some_and(|p| p.has_previous()) {
            self.emit(|e| e.go_to_previous_page());
        }
    }

    pub fn go_to_page(&self, page: usize) {
        self.emit(|e| e.set_page(page));
    }

    /// Asks the data provider to refetch. Only meaningful in the error state.
    pub fn retry(&self) {
        if self.status.is_error() {
            self.emit(|e| e.retry());
        }
    }

    fn reset_page(&self) {
        if self.config.reset_page_on_change && self.page.is_some_and(|p| p.current_page > 1) {
            debug!("Criteria changed, returning to page 1");
            self.emit(|e| e.set_page(1));
        }
    }

    // ---- derived state ----

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn page(&self) -> Option<&PageInfo> {
        self.page.as_ref()
    }

    pub fn status(&self) -> &DataStatus {
        &self.status
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Rows after local search and filters, with group labels, sorted.
    pub fn processed_rows(&self) -> Vec<TableRow> {
        let mut rows = self.rows.clone();

        if !self.search.is_controlled() {
            let visible = self.visible_columns();
            rows = search_rows(rows, self.search.value(), &visible, &self.renderers, &self.config.labels);
        }
        if !self.filters.is_controlled() {
            rows = filter::filter_rows(rows, self.filters.value(), &self.columns);
        }
        rows = group::assign_groups(rows, &self.group_columns, &self.columns, &self.config.labels.ungrouped);
        sort::sort_rows(rows, self.sort.as_ref(), &self.columns)
    }

    /// Processed rows of the current page.
    pub fn page_rows(&self) -> Vec<TableRow> {
        let mut rows = self.processed_rows();
        if let Some(page) = &self.page {
            let window = page.window(rows.len());
            rows.truncate(window.end);
            rows.drain(..window.start);
        }
        rows
    }

    fn page_ids(&self) -> Vec<String> {
        self.page_rows().into_iter().map(|r| r.id).collect()
    }

    /// Logical row count: the server total when known, else the number of
    /// processed rows.
    pub fn total(&self) -> usize {
        match self.page.and_then(|p| p.total) {
            Some(total) => total,
            None => self.processed_rows().len(),
        }
    }

    pub fn summary(&self) -> TableSummary {
        TableSummary {
            total: self.total(),
            selected: self.selected_count(),
            page: self.page,
        }
    }

    /// Projects the current page into the active view.
    ///
    /// Loading and error states short-circuit before any rows are processed.
    /// A custom renderer replaces every built-in view.
    pub fn view(&self) -> View {
        let labels = &self.config.labels;
        match &self.status {
            DataStatus::Loading => {
                return View::Loading {
                    message: labels.loading.clone(),
                };
            }
            DataStatus::Error { message } => {
                return View::Error {
                    message: message.clone().unwrap_or_else(|| labels.error.clone()),
                    can_retry: self.events.is_some(),
                };
            }
            DataStatus::Ready => {}
        }

        let rows = self.page_rows();
        let columns = self.visible_columns();

        if let Some(custom) = &self.custom {
            return View::Custom(custom.render(&rows, &columns));
        }
        if rows.is_empty() {
            return View::Empty {
                mode: self.view_mode,
                message: labels.no_results.clone(),
            };
        }

        let projector = Projector::new(&columns, &self.renderers, labels)
            .with_sort(self.sort.as_ref())
            .with_widths(&self.visibility)
            .with_card_fields(self.config.card_fields);
        match self.view_mode {
            ViewMode::Grid => {
                let ids: Vec<String> = rows.iter().map(|r| r.id.clone()).collect();
                View::Grid(projector.grid(&rows, selection::all_selected(&self.rows, &ids)))
            }
            ViewMode::Cards => View::Cards(projector.cards(&rows)),
            ViewMode::Group => View::Group(projector.groups(&rows)),
        }
    }
}

impl std::fmt::Debug for TableController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableController")
            .field("rows", &self.rows.len())
            .field("columns", &self.columns.len())
            .field("search", &self.search)
            .field("filters", &self.filters)
            .field("sort", &self.sort)
            .field("group_columns", &self.group_columns)
            .field("view_mode", &self.view_mode)
            .field("page", &self.page)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}
