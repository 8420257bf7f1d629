use super::common::{require_columns, rewrite_column, CellOutcome, ColumnMatch, StageOutput};
use super::schema::ADDRESS;
use crate::errors::Result;
use crate::model::Table;
use crate::pipeline::Stage;

/// Diagnostic only: reports `Address` cells that are not valid UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddressStage;

impl Stage for AddressStage {
    fn name(&self) -> &'static str {
        "Address"
    }

    fn apply(&self, table: &Table) -> Result<StageOutput> {
        let Some(header) = table.header() else {
            return Ok(StageOutput::unchanged(table));
        };
        let [column] = require_columns(self.name(), header, [ADDRESS], ColumnMatch::IgnoreCase)?;

        Ok(rewrite_column(self.name(), table, column, |cell| {
            if cell.is_valid_utf8() {
                CellOutcome::Keep
            } else {
                CellOutcome::reject("invalid UTF-8 in Address")
            }
        }))
    }
}
