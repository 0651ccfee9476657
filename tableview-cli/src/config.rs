//! Config and fixture loading

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use log::debug;
use log::info;
use serde::Deserialize;
use tableview_lib::model::GroupableColumn;
use tableview_lib::model::TableColumn;
use tableview_lib::model::TableMetadata;
use tableview_lib::model::TableRow;
use tableview_lib::TableConfig;

use crate::error::ConfigError;
use crate::paths;

/// A table data file: schema, rows and optional metadata.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    pub columns: Vec<TableColumn>,
    #[serde(default)]
    pub rows: Vec<TableRow>,
    #[serde(default)]
    pub metadata: Option<TableMetadata>,
    #[serde(default)]
    pub groupable_columns: Option<Vec<GroupableColumn>>,
}

impl Fixture {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let fixture: Self = serde_json::from_str(&text).map_err(|e| ConfigError::parse(path, e))?;
        info!(
            "Loaded fixture {}: {} rows, {} columns",
            path.display(),
            fixture.rows.len(),
            fixture.columns.len()
        );
        Ok(fixture)
    }
}

/// Loads the engine config.
///
/// An explicit path must exist. Without one, `<config_dir>/config.json` is
/// used when present and defaults otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<TableConfig, ConfigError> {
    let path: PathBuf = match explicit {
        Some(path) => path.to_path_buf(),
        None => match paths::config_file() {
            Some(path) if path.exists() => path,
            _ => {
                debug!("No config file, using defaults");
                return Ok(TableConfig::default());
            }
        },
    };

    let text = fs::read_to_string(&path).map_err(|e| ConfigError::io(&path, e))?;
    let config = TableConfig::from_json(&text).map_err(|e| ConfigError::parse(&path, e))?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}
