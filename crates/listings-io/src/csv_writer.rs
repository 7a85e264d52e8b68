//! CSV writer for (augmented) listings tables

use crate::reader::{IoError, IoResult};
use crate::table::ListingTable;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes a `ListingTable` as delimited text, header first, rows in table order.
#[derive(Debug, Clone)]
pub struct CsvWriter {
    delimiter: u8,
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Writer matching the output path's extension: tab-separated for
    /// `.tsv`, comma-separated otherwise.
    pub fn for_path(path: &str) -> Self {
        let is_tsv = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("tsv"));
        if is_tsv {
            Self::new().with_delimiter(b'\t')
        } else {
            Self::new()
        }
    }

    /// Write the table to a file, replacing it if present
    pub fn write_table(&self, table: &ListingTable, path: &str) -> IoResult<()> {
        let file = File::create(path).map_err(|e| IoError::OpenFailed(e.to_string()))?;
        self.write_to(table, BufWriter::new(file))
    }

    /// Write the table to any writer
    pub fn write_to<W: Write>(&self, table: &ListingTable, writer: W) -> IoResult<()> {
        let mut out = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(writer);

        out.write_record(table.column_names())
            .map_err(|e| IoError::Io(e.to_string()))?;

        let columns: Vec<_> = table.iter().map(|(_, c)| c).collect();
        for row in 0..table.num_rows() {
            let record = columns
                .iter()
                .map(|c| c.cell(row).unwrap_or_default());
            out.write_record(record)
                .map_err(|e| IoError::Io(e.to_string()))?;
        }

        out.flush().map_err(|e| IoError::Io(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DataColumn;

    #[test]
    fn test_writes_header_and_rows_in_order() {
        let mut table = ListingTable::default();
        table
            .add_column("id", DataColumn::Int64(vec![Some(7), Some(8)]))
            .unwrap();
        table
            .add_column("wifi", DataColumn::from_bools(vec![true, false]))
            .unwrap();
        table
            .add_column("price", DataColumn::Float64(vec![f64::NAN, 95.5]))
            .unwrap();

        let mut buf = Vec::new();
        CsvWriter::new().write_to(&table, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(text, "id,wifi,price\n7,true,\n8,false,95.5\n");
    }

    #[test]
    fn test_tsv_path_writes_tabs() {
        let mut table = ListingTable::default();
        table
            .add_column("id", DataColumn::Int64(vec![Some(1)]))
            .unwrap();
        table
            .add_column("room_type", DataColumn::Text(vec![Some("Private room".into())]))
            .unwrap();

        let mut buf = Vec::new();
        CsvWriter::for_path("out/listings.TSV")
            .write_to(&table, &mut buf)
            .unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "id\troom_type\n1\tPrivate room\n");

        let mut buf = Vec::new();
        CsvWriter::for_path("listings.csv").write_to(&table, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "id,room_type\n1,Private room\n");
    }
}
