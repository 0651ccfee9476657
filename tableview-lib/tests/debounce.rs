//! Integration tests for the debounced search commit.
//!
//! Run on a paused tokio clock, so debounce delays elapse through
//! `tokio::time::advance` instead of real time.

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use tableview_lib::config::TableConfig;
use tableview_lib::controller::TableController;
use tableview_lib::controller::TableProps;
use tableview_lib::model::TableColumn;
use tableview_lib::model::TableRow;
use tokio::time::advance;
use tokio::time::Instant;

fn table() -> TableController {
    let rows = vec![
        TableRow::new("1").set("name", "Ada"),
        TableRow::new("2").set("name", "Grace"),
    ];
    TableController::new(TableProps::new(rows, vec![TableColumn::new("name", "Name")]))
}

#[tokio::test(start_paused = true)]
async fn test_search_commits_after_pause() {
    let mut table = table();
    table.search_input("gr");

    assert_eq!(table.search_draft(), "gr");
    assert_eq!(table.search(), "");
    assert_eq!(table.processed_rows().len(), 2);

    advance(Duration::from_millis(299)).await;
    assert!(!table.tick(Instant::now()));

    advance(Duration::from_millis(1)).await;
    assert!(table.tick(Instant::now()));
    assert_eq!(table.search(), "gr");
    assert_eq!(table.processed_rows()[0].id, "2");
}

#[tokio::test(start_paused = true)]
async fn test_each_keystroke_restarts_timer() {
    let mut table = table().with_config(TableConfig::default().with_search_debounce(Duration::from_millis(400)));

    table.search_input("a");
    advance(Duration::from_millis(300)).await;
    table.search_input("ad");
    advance(Duration::from_millis(300)).await;
    assert!(!table.tick(Instant::now()));

    assert!(table.settle_search().await);
    assert_eq!(table.search(), "ad");
}

#[tokio::test(start_paused = true)]
async fn test_controlled_search_notifies_once() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let props = TableProps::new(vec![], vec![TableColumn::new("name", "Name")])
        .with_controlled_search("", move |q: &String| sink.lock().unwrap().push(q.clone()));
    let mut table = TableController::new(props);

    for text in ["a", "ad", "ada"] {
        table.search_input(text);
        advance(Duration::from_millis(100)).await;
        assert!(!table.tick(Instant::now()));
    }
    assert!(table.settle_search().await);
    assert_eq!(*seen.lock().unwrap(), ["ada"]);
}

#[tokio::test(start_paused = true)]
async fn test_disabled_search_never_commits() {
    let mut table = table();
    table.search_input("ada");
    table.set_search_enabled(false);

    advance(Duration::from_secs(5)).await;
    assert!(!table.tick(Instant::now()));
    assert!(!table.settle_search().await);
    assert_eq!(table.search(), "");
}
