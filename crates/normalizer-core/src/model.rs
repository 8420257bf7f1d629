use std::borrow::Cow;
use std::fmt;

/// One CSV field, kept as raw bytes so that invalid encodings survive the round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Cell(Vec<u8>);

impl Cell {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the cell text when it is well-formed UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    pub fn is_valid_utf8(&self) -> bool {
        self.as_str().is_some()
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self(value.into_bytes())
    }
}

impl From<Vec<u8>> for Cell {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl From<&[u8]> for Cell {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

pub type Row = Vec<Cell>;

/// The whole file in memory. Row 0 is the header; rows may be ragged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Builds a table from string literals, mostly useful in tests.
    pub fn from_strings<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|v| Cell::from(v.as_ref())).collect())
            .collect();
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total number of rows, header included.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn header(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// Rows after the header.
    pub fn data_rows(&self) -> &[Row] {
        self.rows.get(1..).unwrap_or_default()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Looks up a cell by data row (0-based, header excluded) and column index.
    pub fn cell(&self, data_row: usize, column: usize) -> Option<&Cell> {
        self.data_rows()
            .get(data_row)
            .and_then(|row| row.get(column))
    }
}
