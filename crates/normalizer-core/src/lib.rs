//! Batch CSV record normalization: load a table, run the fixed stage pipeline, write it back.

pub mod config;
pub mod errors;
pub mod io;
pub mod model;
mod pipeline;
pub mod stages;

pub use config::PipelineConfig;
pub use errors::{CellWarning, NormalizeError, Result};
pub use io::{read_table, read_table_from, write_table, write_table_to};
pub use model::{Cell, Row, Table};
pub use pipeline::{run_stages, Pipeline, PipelineReport, Stage};

#[cfg(test)]
mod tests;
