//! CLI error types

use std::path::PathBuf;

use tableview_lib::TableError;

/// Failure to load a JSON input file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: TableError,
    },
}

impl ConfigError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: impl Into<TableError>) -> Self {
        Self::Parse {
            path: path.into(),
            source: source.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid --{flag} value '{value}': expected {expected}")]
    InvalidArg {
        flag: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error(transparent)]
    Table(#[from] TableError),
}

impl CliError {
    pub fn invalid(flag: &'static str, value: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidArg {
            flag,
            value: value.into(),
            expected,
        }
    }
}
