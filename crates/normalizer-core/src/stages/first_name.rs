use super::common::{
    cell_text, require_columns, rewrite_column, CellOutcome, ColumnMatch, StageOutput,
};
use super::schema::FULL_NAME;
use crate::errors::Result;
use crate::model::{Cell, Table};
use crate::pipeline::Stage;

/// Uppercases the first whitespace-separated token of `FullName` and collapses spacing.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstNameStage;

impl FirstNameStage {
    pub fn capitalize(value: &str) -> Option<String> {
        let mut tokens = value.split_whitespace();
        let first = tokens.next()?.to_uppercase();
        Some(
            std::iter::once(first.as_str())
                .chain(tokens)
                .collect::<Vec<_>>()
                .join(" "),
        )
    }
}

impl Stage for FirstNameStage {
    fn name(&self) -> &'static str {
        "FirstName"
    }

    fn apply(&self, table: &Table) -> Result<StageOutput> {
        let Some(header) = table.header() else {
            return Ok(StageOutput::unchanged(table));
        };
        let [column] = require_columns(self.name(), header, [FULL_NAME], ColumnMatch::IgnoreCase)?;

        Ok(rewrite_column(self.name(), table, column, |cell| {
            let text = match cell_text(cell) {
                Ok(text) => text,
                Err(outcome) => return outcome,
            };
            match Self::capitalize(text) {
                Some(name) => CellOutcome::Replace(Cell::from(name)),
                None => CellOutcome::Keep,
            }
        }))
    }
}
