use serde::Serialize;

use super::CellRenderers;
use super::ViewMode;
use crate::config::Labels;
use crate::model::TableColumn;
use crate::model::TableRow;
use crate::model::ACTIONS_COLUMN;
use crate::sort::SortConfig;
use crate::sort::SortDirection;
use crate::toolbar::ColumnVisibility;

/// Caller-supplied rendering that replaces every built-in view.
///
/// Receives the fully processed rows (filtered, grouped, sorted, paged) and
/// the visible columns.
pub trait CustomRenderer: Send + Sync {
    fn render(&self, rows: &[TableRow], columns: &[TableColumn]) -> String;
}

impl<F> CustomRenderer for F
where
    F: Fn(&[TableRow], &[TableColumn]) -> String + Send + Sync,
{
    fn render(&self, rows: &[TableRow], columns: &[TableColumn]) -> String {
        self(rows, columns)
    }
}

/// What the user sees.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum View {
    /// Data is being fetched.
    Loading { message: String },
    /// Data fetch failed. Suppresses every other projection.
    Error { message: String, can_retry: bool },
    /// Nothing left after search and filters.
    Empty { mode: ViewMode, message: String },
    Grid(GridView),
    Cards(Vec<Card>),
    Group(GroupView),
    /// Output of a [`CustomRenderer`].
    Custom(String),
}

impl View {
    /// Number of data rows in the projection (0 for status views).
    pub fn row_count(&self) -> usize {
        match self {
            View::Grid(grid) => grid.rows.len(),
            View::Cards(cards) => cards.len(),
            View::Group(group) => group.sections.iter().map(|s| s.rows.len()).sum(),
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderCell {
    pub column_id: String,
    pub header: String,
    pub sortable: bool,
    /// Direction when this column is the sorted one.
    pub sort: Option<SortDirection>,
    /// Width set by a resize; `None` leaves sizing to the front-end.
    pub width: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRow {
    pub id: String,
    pub avatar: Option<String>,
    pub selected: bool,
    pub group: Option<String>,
    /// Formatted cells, one per header.
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridView {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<GridRow>,
    /// Header checkbox state for the rows in scope.
    pub all_selected: bool,
    /// Whether rows carry edit/delete actions.
    pub row_actions: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardField {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub id: String,
    pub avatar: Option<String>,
    pub title: String,
    pub selected: bool,
    pub fields: Vec<CardField>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSection {
    pub label: String,
    pub count: usize,
    pub rows: Vec<GridRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupView {
    pub headers: Vec<HeaderCell>,
    pub sections: Vec<GroupSection>,
    pub row_actions: bool,
}

/// Builds the grid, card and group projections over a set of visible columns.
pub struct Projector<'a> {
    columns: &'a [TableColumn],
    renderers: &'a CellRenderers,
    labels: &'a Labels,
    sort: Option<&'a SortConfig>,
    widths: Option<&'a ColumnVisibility>,
    card_fields: usize,
}

impl<'a> Projector<'a> {
    pub fn new(columns: &'a [TableColumn], renderers: &'a CellRenderers, labels: &'a Labels) -> Self {
        Self {
            columns,
            renderers,
            labels,
            sort: None,
            widths: None,
            card_fields: 3,
        }
    }

    pub fn with_sort(mut self, sort: Option<&'a SortConfig>) -> Self {
        self.sort = sort;
        self
    }

    /// Takes header widths from the user's column resizes.
    pub fn with_widths(mut self, visibility: &'a ColumnVisibility) -> Self {
        self.widths = Some(visibility);
        self
    }

    pub fn with_card_fields(mut self, count: usize) -> Self {
        self.card_fields = count;
        self
    }

    fn data_columns(&self) -> impl Iterator<Item = &'a TableColumn> + use<'a> {
        self.columns.iter().filter(|c| !c.is_structural())
    }

    fn row_actions(&self) -> bool {
        self.columns.iter().any(|c| c.id == ACTIONS_COLUMN)
    }

    fn headers(&self) -> Vec<HeaderCell> {
        self.data_columns()
            .map(|c| HeaderCell {
                column_id: c.id.clone(),
                header: c.header.clone(),
                sortable: c.sortable,
                sort: self.sort.filter(|s| s.column == c.id).map(|s| s.direction),
                width: self.widths.and_then(|w| w.width(&c.id)),
            })
            .collect()
    }

    fn grid_row(&self, row: &TableRow) -> GridRow {
        GridRow {
            id: row.id.clone(),
            avatar: row.avatar.clone(),
            selected: row.selected,
            group: row.group.clone(),
            cells: self
                .data_columns()
                .map(|c| self.renderers.render(row, c, self.labels))
                .collect(),
        }
    }

    /// Tabular projection. `all_selected` is the header checkbox state.
    pub fn grid(&self, rows: &[TableRow], all_selected: bool) -> GridView {
        GridView {
            headers: self.headers(),
            rows: rows.iter().map(|r| self.grid_row(r)).collect(),
            all_selected,
            row_actions: self.row_actions(),
        }
    }

    /// Card projection: the first data column is the title, the next
    /// `card_fields` data columns are listed below it.
    pub fn cards(&self, rows: &[TableRow]) -> Vec<Card> {
        let mut columns = self.data_columns();
        let title = columns.next();
        let fields: Vec<&TableColumn> = columns.take(self.card_fields).collect();

        rows.iter()
            .map(|row| Card {
                id: row.id.clone(),
                avatar: row.avatar.clone(),
                title: title
                    .map(|c| self.renderers.render(row, c, self.labels))
                    .unwrap_or_default(),
                selected: row.selected,
                fields: fields
                    .iter()
                    .map(|c| CardField {
                        label: c.header.clone(),
                        value: self.renderers.render(row, c, self.labels),
                    })
                    .collect(),
            })
            .collect()
    }

    /// Group projection: rows bucketed by their `group` label in order of
    /// first appearance, so the active sort also orders the buckets.
    pub fn groups(&self, rows: &[TableRow]) -> GroupView {
        let mut sections: Vec<GroupSection> = Vec::new();
        for row in rows {
            let label = row.group.as_deref().unwrap_or(&self.labels.ungrouped);
            let grid_row = self.grid_row(row);
            match sections.iter_mut().find(|s| s.label == label) {
                Some(section) => {
                    section.count += 1;
                    section.rows.push(grid_row);
                }
                None => sections.push(GroupSection {
                    label: label.to_string(),
                    count: 1,
                    rows: vec![grid_row],
                }),
            }
        }

        GroupView {
            headers: self.headers(),
            sections,
            row_actions: self.row_actions(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AVATAR_COLUMN;

    fn columns() -> Vec<TableColumn> {
        vec![
            TableColumn::new(AVATAR_COLUMN, ""),
            TableColumn::new("name", "Name").sortable(),
            TableColumn::new("email", "Email"),
            TableColumn::new("status", "Status"),
            TableColumn::new("level", "Level"),
            TableColumn::new("room", "Room"),
            TableColumn::new(ACTIONS_COLUMN, ""),
        ]
    }

    fn row(id: &str, name: &str, group: Option<&str>) -> TableRow {
        let mut row = TableRow::new(id)
            .set("name", name)
            .set("email", format!("{name}@example.com"))
            .set("status", true)
            .set("level", 2)
            .set("room", "B1");
        row.group = group.map(str::to_string);
        row
    }

    #[test]
    fn test_grid_headers_mark_sort() {
        let columns = columns();
        let renderers = CellRenderers::new();
        let labels = Labels::default();
        let sort = SortConfig::desc("name");

        let grid = Projector::new(&columns, &renderers, &labels)
            .with_sort(Some(&sort))
            .grid(&[row("1", "ada", None)], false);

        let ids: Vec<_> = grid.headers.iter().map(|h| h.column_id.as_str()).collect();
        assert_eq!(ids, ["name", "email", "status", "level", "room"]);
        assert_eq!(grid.headers[0].sort, Some(SortDirection::Desc));
        assert_eq!(grid.headers[1].sort, None);
        assert_eq!(grid.rows[0].cells[2], "Yes");
        assert!(grid.row_actions);
    }

    #[test]
    fn test_headers_carry_resized_widths() {
        let columns = columns();
        let renderers = CellRenderers::new();
        let labels = Labels::default();
        let mut widths = ColumnVisibility::new();
        widths.resize("email", 30, &columns);

        let grid = Projector::new(&columns, &renderers, &labels)
            .with_widths(&widths)
            .grid(&[row("1", "ada", None)], false);
        assert_eq!(grid.headers[0].width, None);
        assert_eq!(grid.headers[1].width, Some(30));
    }

    #[test]
    fn test_cards_take_title_and_three_fields() {
        let columns = columns();
        let renderers = CellRenderers::new();
        let labels = Labels::default();

        let cards = Projector::new(&columns, &renderers, &labels).cards(&[row("1", "ada", None)]);
        assert_eq!(cards[0].title, "ada");
        let labels: Vec<_> = cards[0].fields.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, ["Email", "Status", "Level"]);
    }

    #[test]
    fn test_groups_keep_first_appearance_order() {
        let columns = columns();
        let renderers = CellRenderers::new();
        let labels = Labels::default();
        let rows = vec![
            row("1", "a", Some("Status: B")),
            row("2", "b", Some("Status: A")),
            row("3", "c", Some("Status: B")),
            row("4", "d", None),
        ];

        let view = Projector::new(&columns, &renderers, &labels).groups(&rows);
        let sections: Vec<_> = view.sections.iter().map(|s| (s.label.as_str(), s.count)).collect();
        assert_eq!(sections, [("Status: B", 2), ("Status: A", 1), ("Ungrouped", 1)]);
    }

    #[test]
    fn test_row_count() {
        let columns = columns();
        let renderers = CellRenderers::new();
        let labels = Labels::default();
        let rows = vec![row("1", "a", Some("x")), row("2", "b", Some("y"))];
        let projector = Projector::new(&columns, &renderers, &labels);

        assert_eq!(View::Group(projector.groups(&rows)).row_count(), 2);
        assert_eq!(View::Cards(projector.cards(&rows)).row_count(), 2);
        assert_eq!(View::Custom(String::new()).row_count(), 0);
    }
}
