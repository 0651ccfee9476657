use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;
use tableview_lib::filter::FilterDraft;
use tableview_lib::filter::FilterOperator;
use tableview_lib::filter::FilterValue;
use tableview_lib::filter::Scalar;
use tableview_lib::sort::SortDirection;
use tableview_lib::view::ViewMode;

use crate::error::CliError;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ViewArg {
    Grid,
    Cards,
}

impl From<ViewArg> for ViewMode {
    fn from(view: ViewArg) -> Self {
        match view {
            ViewArg::Grid => ViewMode::Grid,
            ViewArg::Cards => ViewMode::Cards,
        }
    }
}

/// Command-line arguments for tableview
#[derive(Parser, Debug)]
#[command(version, about = "Render a JSON table fixture through the table engine")]
pub struct Args {
    /// JSON file with `columns`, `rows` and optional `metadata`
    #[arg(long)]
    pub fixture: PathBuf,

    /// JSON config file (default: <config dir>/config.json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Search text, matched against every visible column
    #[arg(long)]
    pub search: Option<String>,

    /// Filter as `column:operator:value`. Ranges use `start..end`, lists use commas
    #[arg(long = "filter")]
    pub filters: Vec<String>,

    /// Sort as `column` or `column:desc`
    #[arg(long)]
    pub sort: Option<String>,

    /// Group by a column (repeatable, in order)
    #[arg(long = "group")]
    pub groups: Vec<String>,

    /// View mode
    #[arg(long, value_enum)]
    pub view: Option<ViewArg>,

    /// Hide a column (repeatable)
    #[arg(long = "hide")]
    pub hidden: Vec<String>,

    /// Column width as `column=cells` (repeatable); longer cells are cut
    #[arg(long = "width")]
    pub widths: Vec<String>,

    /// Select a row by id (repeatable)
    #[arg(long = "select")]
    pub selected: Vec<String>,

    /// Page to show (with --per-page)
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page
    #[arg(long = "per-page")]
    pub per_page: Option<usize>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parses `column` or `column:asc|desc`.
pub fn parse_sort(raw: &str) -> Result<(String, SortDirection), CliError> {
    let (column, direction) = match raw.split_once(':') {
        Some((column, dir)) => (column, dir),
        None => (raw, "asc"),
    };
    let direction = match direction.to_ascii_lowercase().as_str() {
        "asc" => SortDirection::Asc,
        "desc" => SortDirection::Desc,
        _ => return Err(CliError::invalid("sort", raw, "column[:asc|desc]")),
    };
    if column.is_empty() {
        return Err(CliError::invalid("sort", raw, "column[:asc|desc]"));
    }
    Ok((column.to_string(), direction))
}

/// Parses `column=width`.
pub fn parse_width(raw: &str) -> Result<(String, u16), CliError> {
    let invalid = || CliError::invalid("width", raw, "column=width");
    let (column, width) = raw.split_once('=').ok_or_else(invalid)?;
    let width = width.trim().parse().map_err(|_| invalid())?;
    if column.is_empty() {
        return Err(invalid());
    }
    Ok((column.to_string(), width))
}

/// Parses `column:operator:value` into a draft.
///
/// The value part is optional for presence checks. `between` takes
/// `start..end`; `in`/`notIn` take a comma-separated list.
pub fn parse_filter(raw: &str) -> Result<FilterDraft, CliError> {
    let mut parts = raw.splitn(3, ':');
    let column = parts.next().unwrap_or_default();
    let operator = parts.next().unwrap_or_default();
    let value = parts.next().unwrap_or_default();
    if column.is_empty() || operator.is_empty() {
        return Err(CliError::invalid("filter", raw, "column:operator:value"));
    }

    let operator = FilterOperator::parse(operator);
    let value = if operator.is_null_check() {
        FilterValue::Empty
    } else if operator.is_range() {
        match value.split_once("..") {
            Some((start, end)) => FilterValue::range(scalar(start), scalar(end)),
            None => return Err(CliError::invalid("filter", raw, "column:between:start..end")),
        }
    } else if operator.is_multi() {
        FilterValue::multi(value.split(',').map(str::trim).filter(|v| !v.is_empty()).map(scalar))
    } else {
        FilterValue::scalar(scalar(value))
    };

    Ok(FilterDraft::new(column, operator, value))
}

/// Numbers and booleans are typed, everything else stays text.
fn scalar(text: &str) -> Scalar {
    let text = text.trim();
    if let Ok(n) = text.parse::<f64>() {
        return Scalar::Number(n);
    }
    match text {
        "true" => Scalar::Bool(true),
        "false" => Scalar::Bool(false),
        _ => Scalar::Text(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "tableview",
            "--fixture",
            "rows.json",
            "--filter",
            "status:=:Active",
            "--filter",
            "level:in:L1,L2",
            "--group",
            "status",
            "--view",
            "cards",
            "-vv",
        ])
        .unwrap();

        assert_eq!(args.filters.len(), 2);
        assert_eq!(args.groups, ["status"]);
        assert_eq!(args.view, Some(ViewArg::Cards));
        assert_eq!(args.page, 1);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_parse_sort() {
        let (column, direction) = parse_sort("name:desc").unwrap();
        assert_eq!(column, "name");
        assert_eq!(direction, SortDirection::Desc);
        assert_eq!(parse_sort("name").unwrap().1, SortDirection::Asc);
        assert!(parse_sort("name:sideways").is_err());
    }

    #[test]
    fn test_parse_width() {
        assert_eq!(parse_width("name=12").unwrap(), ("name".to_string(), 12));
        assert!(parse_width("name").is_err());
        assert!(parse_width("name=wide").is_err());
        assert!(parse_width("=12").is_err());
    }

    #[test]
    fn test_parse_filter_shapes() {
        let draft = parse_filter("age:between:18..30").unwrap();
        assert_eq!(draft.value, FilterValue::range(18, 30));

        let draft = parse_filter("level:in:L1, L2").unwrap();
        assert_eq!(draft.value, FilterValue::multi(["L1", "L2"]));

        let draft = parse_filter("email:isNull").unwrap();
        assert_eq!(draft.operator, Some(FilterOperator::IsNull));
        assert_eq!(draft.value, FilterValue::Empty);

        let draft = parse_filter("start:>=:2024-01-01").unwrap();
        assert_eq!(draft.value, FilterValue::scalar("2024-01-01"));

        assert!(parse_filter("status").is_err());
        assert!(parse_filter("age:between:18").is_err());
    }
}
