//! Plain-text rendering of a table view

use std::fmt::Write;

use tableview_lib::sort::SortDirection;
use tableview_lib::view::Card;
use tableview_lib::view::GridRow;
use tableview_lib::view::HeaderCell;
use tableview_lib::view::View;
use tableview_lib::TableSummary;

const GAP: &str = "  ";

pub fn render_view(view: &View) -> String {
    match view {
        View::Loading { message } => format!("{message}\n"),
        View::Error { message, can_retry } => {
            if *can_retry {
                format!("error: {message} (retry available)\n")
            } else {
                format!("error: {message}\n")
            }
        }
        View::Empty { mode, message } => format!("[{mode}] {message}\n"),
        View::Grid(grid) => table(&grid.headers, &grid.rows),
        View::Cards(cards) => cards.iter().map(card).collect::<Vec<_>>().join("\n"),
        View::Group(group) => {
            let mut out = String::new();
            for section in &group.sections {
                let _ = writeln!(out, "== {} ({}) ==", section.label, section.count);
                out.push_str(&table(&group.headers, &section.rows));
                out.push('\n');
            }
            out
        }
        View::Custom(text) => format!("{text}\n"),
    }
}

pub fn render_summary(summary: &TableSummary) -> String {
    let mut line = format!("{} rows, {} selected", summary.total, summary.selected);
    if let Some(page) = &summary.page {
        let _ = write!(line, ", page {} of {}", page.current_page, page.last_page);
    }
    line
}

fn header_text(header: &HeaderCell) -> String {
    match header.sort {
        Some(SortDirection::Asc) => format!("{} ^", header.header),
        Some(SortDirection::Desc) => format!("{} v", header.header),
        None => header.header.clone(),
    }
}

fn checkbox(selected: bool) -> &'static str {
    if selected { "[x]" } else { "[ ]" }
}

/// Resized columns keep their width and cut longer text; the others fit
/// their widest cell.
fn table(headers: &[HeaderCell], rows: &[GridRow]) -> String {
    let titles: Vec<String> = headers.iter().map(header_text).collect();
    let mut widths: Vec<usize> = headers
        .iter()
        .zip(&titles)
        .map(|(header, title)| header.width.map_or(title.chars().count(), usize::from))
        .collect();
    for row in rows {
        for ((width, cell), header) in widths.iter_mut().zip(&row.cells).zip(headers) {
            if header.width.is_none() {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let line = |marker: &str, cells: &[String]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| {
                let cell: String = cell.chars().take(width).collect();
                format!("{cell:<width$}")
            })
            .collect();
        format!("{marker} {}", padded.join(GAP)).trim_end().to_string()
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", line("   ", titles.as_slice()));
    for row in rows {
        let _ = writeln!(out, "{}", line(checkbox(row.selected), row.cells.as_slice()));
    }
    out
}

fn card(card: &Card) -> String {
    let mut out = format!("{} {}\n", checkbox(card.selected), card.title);
    for field in &card.fields {
        let _ = writeln!(out, "    {}: {}", field.label, field.value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tableview_lib::view::CardField;
    use tableview_lib::view::GridView;
    use tableview_lib::view::ViewMode;

    #[test]
    fn test_grid_alignment() {
        let view = View::Grid(GridView {
            headers: vec![
                HeaderCell {
                    column_id: "name".to_string(),
                    header: "Name".to_string(),
                    sortable: true,
                    sort: Some(SortDirection::Asc),
                    width: None,
                },
                HeaderCell {
                    column_id: "level".to_string(),
                    header: "Level".to_string(),
                    sortable: false,
                    sort: None,
                    width: None,
                },
            ],
            rows: vec![GridRow {
                id: "1".to_string(),
                avatar: None,
                selected: true,
                group: None,
                cells: vec!["Ada Lovelace".to_string(), "L1".to_string()],
            }],
            all_selected: true,
            row_actions: false,
        });

        assert_eq!(
            render_view(&view),
            "    Name ^        Level\n[x] Ada Lovelace  L1\n"
        );
    }

    #[test]
    fn test_resized_column_cuts_cells() {
        let view = View::Grid(GridView {
            headers: vec![HeaderCell {
                column_id: "name".to_string(),
                header: "Name".to_string(),
                sortable: false,
                sort: None,
                width: Some(6),
            }],
            rows: vec![GridRow {
                id: "1".to_string(),
                avatar: None,
                selected: false,
                group: None,
                cells: vec!["Ada Lovelace".to_string()],
            }],
            all_selected: false,
            row_actions: false,
        });

        assert_eq!(render_view(&view), "    Name\n[ ] Ada Lo\n");
    }

    #[test]
    fn test_card_and_status_views() {
        let view = View::Cards(vec![Card {
            id: "1".to_string(),
            avatar: None,
            title: "Ada".to_string(),
            selected: false,
            fields: vec![CardField {
                label: "Level".to_string(),
                value: "L1".to_string(),
            }],
        }]);
        assert_eq!(render_view(&view), "[ ] Ada\n    Level: L1\n");

        let empty = View::Empty {
            mode: ViewMode::Cards,
            message: "No results".to_string(),
        };
        assert_eq!(render_view(&empty), "[cards] No results\n");
    }
}
