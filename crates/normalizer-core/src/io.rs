use std::io::{Read, Write};
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder, WriterBuilder};

use crate::errors::{NormalizeError, Result};
use crate::model::{Cell, Table};

/// Reads every record of a CSV source. Field counts may vary and bytes need not be UTF-8.
pub fn read_table_from<R: Read>(reader: R) -> std::result::Result<Table, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record?;
        rows.push(record.iter().map(Cell::from).collect());
    }
    Ok(Table::new(rows))
}

pub fn write_table_to<W: Write>(writer: W, table: &Table) -> std::result::Result<(), csv::Error> {
    let mut writer = WriterBuilder::new().flexible(true).from_writer(writer);
    for row in table.rows() {
        let record: ByteRecord = row.iter().map(Cell::as_bytes).collect();
        writer.write_byte_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_table(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| NormalizeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_table_from(file).map_err(|source| NormalizeError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Creates (or truncates) `path` and writes `table` to it.
pub fn write_table(path: impl AsRef<Path>, table: &Table) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path).map_err(|source| NormalizeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_table_to(file, table).map_err(|source| NormalizeError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ragged_rows_and_raw_bytes_survive() {
        let input: &[u8] = b"a,b,c\n1,\"x, y\"\n2,\xff,3,4\n";
        let table = read_table_from(input).expect("read");
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows()[1].len(), 2);
        assert_eq!(table.cell(0, 1), Some(&Cell::from("x, y")));
        assert_eq!(table.cell(1, 1), Some(&Cell::new(vec![0xff])));

        let mut out = Vec::new();
        write_table_to(&mut out, &table).expect("write");
        assert_eq!(out, input);
    }

    #[test]
    fn empty_input_is_an_empty_table() {
        let table = read_table_from(&b""[..]).expect("read");
        assert!(table.is_empty());
        let mut out = Vec::new();
        write_table_to(&mut out, &table).expect("write");
        assert!(out.is_empty());
    }
}
