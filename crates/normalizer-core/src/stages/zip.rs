use super::common::{
    cell_text, require_columns, rewrite_column, CellOutcome, ColumnMatch, StageOutput,
};
use super::schema::ZIP;
use crate::errors::Result;
use crate::model::{Cell, Table};
use crate::pipeline::Stage;

const ZIP_WIDTH: usize = 5;

/// Left-pads numeric ZIP codes with zeros. Never truncates.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipStage;

impl ZipStage {
    pub fn normalize(value: &str) -> CellOutcome {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return CellOutcome::Keep;
        }
        match trimmed.parse::<i64>() {
            Ok(_) => CellOutcome::Replace(Cell::from(format!("{trimmed:0>ZIP_WIDTH$}"))),
            Err(err) => CellOutcome::reject(format!("invalid ZIP value: {err}")),
        }
    }
}

impl Stage for ZipStage {
    fn name(&self) -> &'static str {
        "ZIP"
    }

    fn apply(&self, table: &Table) -> Result<StageOutput> {
        let Some(header) = table.header() else {
            return Ok(StageOutput::unchanged(table));
        };
        let [column] = require_columns(self.name(), header, [ZIP], ColumnMatch::IgnoreCase)?;

        Ok(rewrite_column(self.name(), table, column, |cell| {
            match cell_text(cell) {
                Ok(text) => Self::normalize(text),
                Err(outcome) => outcome,
            }
        }))
    }
}
