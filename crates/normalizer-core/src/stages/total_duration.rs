use super::common::{
    format_seconds, require_columns, rewrite_rows, CellOutcome, ColumnMatch, StageOutput,
};
use super::schema::{BAR_DURATION, FOO_DURATION, TOTAL_DURATION};
use crate::errors::Result;
use crate::model::{Cell, Table};
use crate::pipeline::Stage;

/// Recomputes `TotalDuration` from the already-converted Foo/Bar second counts.
///
/// Has to run after [`DurationsStage`](super::DurationsStage): raw `H:MM:SS` values do not
/// parse as plain numbers and blank the total.
#[derive(Debug, Clone, Copy, Default)]
pub struct TotalDurationStage;

fn parse_seconds(cell: Option<&Cell>) -> Option<f64> {
    cell?.as_str()?.trim().parse().ok()
}

fn describe(cell: Option<&Cell>) -> String {
    match cell {
        Some(cell) => format!("{:?}", cell.to_string_lossy()),
        None => "<missing>".to_string(),
    }
}

impl Stage for TotalDurationStage {
    fn name(&self) -> &'static str {
        "TotalDuration"
    }

    fn apply(&self, table: &Table) -> Result<StageOutput> {
        let Some(header) = table.header() else {
            return Ok(StageOutput::unchanged(table));
        };
        let [foo, bar, total] = require_columns(
            self.name(),
            header,
            [FOO_DURATION, BAR_DURATION, TOTAL_DURATION],
            ColumnMatch::Trimmed,
        )?;

        Ok(rewrite_rows(self.name(), table, |row| {
            let (foo_cell, bar_cell) = (row.get(foo), row.get(bar));
            let outcome = match (parse_seconds(foo_cell), parse_seconds(bar_cell)) {
                (Some(a), Some(b)) => CellOutcome::Replace(format_seconds(a + b)),
                _ => CellOutcome::reject_with(
                    format!(
                        "could not parse FooDuration {} / BarDuration {}",
                        describe(foo_cell),
                        describe(bar_cell)
                    ),
                    Cell::empty(),
                ),
            };
            vec![(total, outcome)]
        }))
    }
}
