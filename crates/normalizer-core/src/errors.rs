use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// A recoverable, per-cell problem. The pipeline keeps going after recording one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellWarning {
    pub stage: &'static str,
    /// 1-based data row number; the header is not counted.
    pub row: usize,
    pub column: String,
    pub value: String,
    pub message: String,
}

impl CellWarning {
    pub fn new(
        stage: &'static str,
        row: usize,
        column: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            stage,
            row,
            column: column.into(),
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for CellWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} row {} column '{}' value {:?}: {}",
            self.stage, self.row, self.column, self.value, self.message
        )
    }
}

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("{stage} stage: required column(s) not found: {}", .columns.join(", "))]
    MissingColumn {
        stage: &'static str,
        columns: Vec<&'static str>,
    },

    #[error("failed to load timezone '{name}': {reason}")]
    Timezone { name: String, reason: String },

    #[error("failed to read CSV from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write CSV to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
