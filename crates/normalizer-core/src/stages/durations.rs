use thiserror::Error;

use super::common::{
    cell_text, format_seconds, require_columns, rewrite_rows, CellOutcome, ColumnMatch,
    StageOutput,
};
use super::schema::{BAR_DURATION, FOO_DURATION};
use crate::errors::Result;
use crate::model::{Cell, Table};
use crate::pipeline::Stage;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DurationError {
    #[error("expected H:MM:SS.fraction, found {0} colon-separated part(s)")]
    Shape(usize),
    #[error("invalid hours '{0}'")]
    Hours(String),
    #[error("invalid minutes '{0}'")]
    Minutes(String),
    #[error("invalid seconds '{0}'")]
    Seconds(String),
}

/// Parses `H:MM:SS.fraction` into total seconds.
pub fn parse_hms(input: &str) -> std::result::Result<f64, DurationError> {
    let parts: Vec<&str> = input.split(':').collect();
    let [hours, minutes, seconds] = parts.as_slice() else {
        return Err(DurationError::Shape(parts.len()));
    };

    let hours: i64 = hours
        .parse()
        .map_err(|_| DurationError::Hours(hours.to_string()))?;
    let minutes: i64 = minutes
        .parse()
        .map_err(|_| DurationError::Minutes(minutes.to_string()))?;
    let seconds: f64 = seconds
        .parse()
        .map_err(|_| DurationError::Seconds(seconds.to_string()))?;

    Ok(hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds)
}

/// Rewrites `FooDuration` and `BarDuration` as seconds with three decimals.
#[derive(Debug, Clone, Copy, Default)]
pub struct DurationsStage;

impl DurationsStage {
    fn convert(cell: &Cell) -> CellOutcome {
        match cell_text(cell) {
            Ok(text) => parse_hms(text).map(format_seconds).into(),
            Err(outcome) => outcome,
        }
    }
}

impl Stage for DurationsStage {
    fn name(&self) -> &'static str {
        "Durations"
    }

    fn apply(&self, table: &Table) -> Result<StageOutput> {
        let Some(header) = table.header() else {
            return Ok(StageOutput::unchanged(table));
        };
        let columns = require_columns(
            self.name(),
            header,
            [FOO_DURATION, BAR_DURATION],
            ColumnMatch::Trimmed,
        )?;

        Ok(rewrite_rows(self.name(), table, |row| {
            columns
                .iter()
                .filter_map(|&idx| row.get(idx).map(|cell| (idx, Self::convert(cell))))
                .collect()
        }))
    }
}
