use super::common::{require_columns, rewrite_column, CellOutcome, ColumnMatch, StageOutput};
use super::schema::NOTES;
use crate::errors::Result;
use crate::model::{Cell, Table};
use crate::pipeline::Stage;

/// Replaces each invalid UTF-8 sequence in `Notes` with U+FFFD.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotesStage;

impl NotesStage {
    /// `None` when the bytes are already valid and nothing needs rewriting.
    pub fn sanitize(bytes: &[u8]) -> Option<String> {
        match String::from_utf8_lossy(bytes) {
            std::borrow::Cow::Borrowed(_) => None,
            std::borrow::Cow::Owned(cleaned) => Some(cleaned),
        }
    }
}

impl Stage for NotesStage {
    fn name(&self) -> &'static str {
        "Notes"
    }

    fn apply(&self, table: &Table) -> Result<StageOutput> {
        let Some(header) = table.header() else {
            return Ok(StageOutput::unchanged(table));
        };
        let [column] = require_columns(self.name(), header, [NOTES], ColumnMatch::IgnoreCase)?;

        Ok(rewrite_column(self.name(), table, column, |cell| {
            match Self::sanitize(cell.as_bytes()) {
                None => CellOutcome::Keep,
                Some(cleaned) => CellOutcome::Repair(Cell::from(cleaned)),
            }
        }))
    }
}
