use tracing::{debug, info, warn};

use crate::errors::{CellWarning, NormalizeError, Result};
use crate::model::{Cell, Row, Table};

/// How a header cell is compared against a required column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnMatch {
    /// Byte-for-byte, first occurrence wins.
    Exact,
    /// ASCII case-insensitive, first occurrence wins.
    IgnoreCase,
    /// Header cell trimmed of surrounding whitespace, then exact. Last occurrence wins.
    Trimmed,
}

impl ColumnMatch {
    fn matches(self, header_cell: &Cell, name: &str) -> bool {
        let bytes = header_cell.as_bytes();
        match self {
            ColumnMatch::Exact => bytes == name.as_bytes(),
            ColumnMatch::IgnoreCase => bytes.eq_ignore_ascii_case(name.as_bytes()),
            ColumnMatch::Trimmed => bytes.trim_ascii() == name.as_bytes(),
        }
    }
}

pub(crate) fn find_column(header: &Row, name: &str, rule: ColumnMatch) -> Option<usize> {
    let mut found = header
        .iter()
        .enumerate()
        .filter(|(_, cell)| rule.matches(cell, name));
    match rule {
        ColumnMatch::Trimmed => found.last().map(|(idx, _)| idx),
        ColumnMatch::Exact | ColumnMatch::IgnoreCase => found.next().map(|(idx, _)| idx),
    }
}

/// Resolves every name in `columns` or fails with all the missing ones listed.
pub(crate) fn require_columns<const N: usize>(
    stage: &'static str,
    header: &Row,
    columns: [&'static str; N],
    rule: ColumnMatch,
) -> Result<[usize; N]> {
    let mut indices = [0usize; N];
    let mut missing = Vec::new();
    for (slot, name) in indices.iter_mut().zip(columns) {
        match find_column(header, name, rule) {
            Some(idx) => {
                debug!(stage, column = name, index = idx, "resolved column");
                *slot = idx;
            }
            None => missing.push(name),
        }
    }
    if missing.is_empty() {
        Ok(indices)
    } else {
        Err(NormalizeError::MissingColumn {
            stage,
            columns: missing,
        })
    }
}

/// Why a cell could not be transformed, plus what (if anything) to store instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellIssue {
    pub message: String,
    pub fallback: Option<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellOutcome {
    Keep,
    Replace(Cell),
    /// Replacement for a value that was damaged but recoverable. Logged, not a warning.
    Repair(Cell),
    Reject(CellIssue),
}

impl CellOutcome {
    pub fn reject(message: impl Into<String>) -> Self {
        CellOutcome::Reject(CellIssue {
            message: message.into(),
            fallback: None,
        })
    }

    pub fn reject_with(message: impl Into<String>, fallback: Cell) -> Self {
        CellOutcome::Reject(CellIssue {
            message: message.into(),
            fallback: Some(fallback),
        })
    }
}

impl<E: std::fmt::Display> From<std::result::Result<Cell, E>> for CellOutcome {
    fn from(value: std::result::Result<Cell, E>) -> Self {
        match value {
            Ok(cell) => CellOutcome::Replace(cell),
            Err(err) => CellOutcome::reject(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StageOutput {
    pub table: Table,
    pub warnings: Vec<CellWarning>,
}

impl StageOutput {
    pub(crate) fn unchanged(table: &Table) -> Self {
        Self {
            table: table.clone(),
            warnings: Vec::new(),
        }
    }
}

/// Copies every row of `table`, letting `edit` decide what happens to the cells it names.
///
/// `edit` receives the original row and returns `(column, outcome)` pairs. Columns past the
/// end of a ragged row are skipped. Warnings come back in row order, and within a row in
/// the order `edit` produced them.
pub(crate) fn rewrite_rows<F>(stage: &'static str, table: &Table, mut edit: F) -> StageOutput
where
    F: FnMut(&Row) -> Vec<(usize, CellOutcome)>,
{
    let Some(header) = table.header() else {
        return StageOutput::unchanged(table);
    };

    let mut rows = Vec::with_capacity(table.len());
    rows.push(header.clone());
    let mut warnings = Vec::new();

    for (idx, row) in table.data_rows().iter().enumerate() {
        let row_number = idx + 1;
        let mut updated = row.clone();
        for (column, outcome) in edit(row) {
            let Some(slot) = updated.get_mut(column) else {
                continue;
            };
            match outcome {
                CellOutcome::Keep => {}
                CellOutcome::Replace(cell) => *slot = cell,
                CellOutcome::Repair(cell) => {
                    info!(
                        stage,
                        row = row_number,
                        value = ?slot.to_string_lossy(),
                        "repaired cell"
                    );
                    *slot = cell;
                }
                CellOutcome::Reject(issue) => {
                    let column_name = header
                        .get(column)
                        .map(|c| c.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    let warning = CellWarning::new(
                        stage,
                        row_number,
                        column_name,
                        slot.to_string_lossy(),
                        issue.message,
                    );
                    warn!(
                        stage,
                        row = warning.row,
                        column = %warning.column,
                        value = ?warning.value,
                        "{}",
                        warning.message
                    );
                    warnings.push(warning);
                    if let Some(fallback) = issue.fallback {
                        *slot = fallback;
                    }
                }
            }
        }
        rows.push(updated);
    }

    info!(
        stage,
        rows = rows.len() - 1,
        warnings = warnings.len(),
        "stage complete"
    );

    StageOutput {
        table: Table::new(rows),
        warnings,
    }
}

/// Single-column form of [`rewrite_rows`].
pub(crate) fn rewrite_column<F>(
    stage: &'static str,
    table: &Table,
    column: usize,
    mut edit: F,
) -> StageOutput
where
    F: FnMut(&Cell) -> CellOutcome,
{
    rewrite_rows(stage, table, |row| match row.get(column) {
        Some(cell) => vec![(column, edit(cell))],
        None => Vec::new(),
    })
}

/// Text of a cell, or a rejection when the bytes are not UTF-8.
pub(crate) fn cell_text(cell: &Cell) -> std::result::Result<&str, CellOutcome> {
    cell.as_str()
        .ok_or_else(|| CellOutcome::reject("value is not valid UTF-8"))
}

pub(crate) fn format_seconds(value: f64) -> Cell {
    Cell::from(format!("{value:.3}"))
}
