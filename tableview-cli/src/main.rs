mod args;
mod config;
mod error;
mod paths;
mod render;

use std::fs;
use std::fs::File;
use std::process::ExitCode;

use clap::Parser;
use log::info;
use log::warn;
use simplelog::ColorChoice;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::TermLogger;
use simplelog::TerminalMode;
use simplelog::WriteLogger;
use tableview_lib::controller::TableController;
use tableview_lib::controller::TableProps;
use tableview_lib::events::TableEvents;
use tableview_lib::page::PageInfo;
use tableview_lib::sort::SortDirection;
use tableview_lib::view::ViewMode;

use crate::args::Args;
use crate::config::Fixture;
use crate::error::CliError;

/// Logs the intents the engine emits; this front-end has no pages to route to.
struct LogEvents;

impl TableEvents for LogEvents {
    fn on_row_click(&self, id: &str) {
        info!("Row clicked: {id}");
    }

    fn on_bulk_action(&self, ids: &[String]) {
        info!("Bulk action on {} rows", ids.len());
    }

    fn set_page(&self, page: usize) {
        info!("Page change requested: {page}");
    }

    fn retry(&self) {
        info!("Retry requested");
    }
}

fn level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Logs to `<cache dir>/latest.log` when it can be created, else to stderr.
fn init_logger(level: LevelFilter) {
    let log_file = paths::log_file().and_then(|path| {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).ok()?;
        }
        File::create(path).ok()
    });

    let result = match log_file {
        Some(file) => WriteLogger::init(level, Config::default(), file),
        None => TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto),
    };
    if let Err(e) = result {
        eprintln!("Failed to initialize logger: {e}");
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = config::load_config(args.config.as_deref())?;
    let fixture = Fixture::load(&args.fixture)?;

    let mut props = TableProps::new(fixture.rows, fixture.columns).with_hidden_columns(args.hidden.clone());
    if let Some(metadata) = fixture.metadata {
        props = props.with_metadata(metadata);
    }
    if let Some(groupable) = fixture.groupable_columns {
        props = props.with_groupable_columns(groupable);
    }
    let mut table = TableController::new(props).with_config(config).with_events(LogEvents);

    if let Some(view) = args.view
        && table.view_mode() != ViewMode::from(view)
    {
        table.toggle_view();
    }

    if !args.filters.is_empty() {
        let drafts = args
            .filters
            .iter()
            .map(|raw| {
                let draft = args::parse_filter(raw)?;
                let kind = table.metadata().and_then(|m| m.definition(&draft.column)).map(|d| d.kind);
                Ok(match kind {
                    Some(kind) => draft.with_kind(kind),
                    None => draft,
                })
            })
            .collect::<Result<Vec<_>, CliError>>()?;
        table.apply_filters(&drafts);
    }

    if let Some(query) = &args.search {
        table.search_input(query.as_str());
        table.flush_search();
    }

    if let Some(raw) = &args.sort {
        let (column, direction) = args::parse_sort(raw)?;
        if table.toggle_sort(&column).is_none() {
            warn!("Column {column} is not sortable");
        } else if direction == SortDirection::Desc {
            table.toggle_sort(&column);
        }
    }

    for column in &args.groups {
        if !table.toggle_group(column) {
            warn!("Column {column} cannot be grouped");
        }
    }

    for raw in &args.widths {
        let (column, width) = args::parse_width(raw)?;
        if table.resize_column(&column, width).is_none() {
            warn!("Column {column} cannot be resized");
        }
    }

    for id in &args.selected {
        if !table.toggle_row(id) {
            warn!("No row with id {id}");
        }
    }

    if let Some(per_page) = args.per_page {
        if per_page == 0 {
            return Err(CliError::invalid("per-page", "0", "a positive number"));
        }
        let total = table.processed_rows().len();
        let last_page = total.div_ceil(per_page).max(1);
        let page = PageInfo::new(args.page.clamp(1, last_page), last_page, per_page).with_total(total);
        table.set_page(Some(page));
    }

    print!("{}", render::render_view(&table.view()));
    println!("{}", render::render_summary(&table.summary()));
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(level(args.verbose));

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
