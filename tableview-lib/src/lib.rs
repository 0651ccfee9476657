//! Table state and view engine
//!
//! A headless engine that owns (or proxies to a parent) every piece of derived
//! table state: search text, structured filters, sort, grouping, column
//! visibility, row selection and the active view mode. Given raw rows and a
//! column schema it produces one deterministic projection of what the user
//! sees.
//!
//! # Example
//!
//! ```
//! use tableview_lib::controller::{TableController, TableProps};
//! use tableview_lib::model::{TableColumn, TableRow};
//!
//! let columns = vec![TableColumn::new("name", "Name").sortable()];
//! let rows = vec![
//!     TableRow::new("1").set("name", "Beta"),
//!     TableRow::new("2").set("name", "Alpha"),
//! ];
//!
//! let mut table = TableController::new(TableProps::new(rows, columns));
//! table.toggle_sort("name");
//!
//! let names: Vec<_> = table.processed_rows().iter().map(|r| r.id.clone()).collect();
//! assert_eq!(names, ["2", "1"]);
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod filter;
pub mod group;
pub mod model;
pub mod owned;
pub mod page;
pub mod selection;
pub mod sort;
pub mod toolbar;
pub mod view;

pub use config::Labels;
pub use config::TableConfig;
pub use controller::DataStatus;
pub use controller::TableController;
pub use controller::TableProps;
pub use controller::TableSummary;
pub use error::ActionError;
pub use error::CapabilityError;
pub use error::TableError;
pub use owned::Owned;
