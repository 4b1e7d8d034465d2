//! Reading uploaded CSV files.
//!
//! The delimiter is inferred from the header line (the most frequent of
//! `,` `;` tab `|`), a UTF-8 byte order mark is dropped and header cells are
//! trimmed. Records may be shorter or longer than the header.

use common::error::IngestError;
use csv::{ReaderBuilder, StringRecord, Trim};

const DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];
const BOM: &str = "\u{feff}";

/// Header and data records of an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Picks the delimiter that occurs most often in the first line.
pub fn detect_delimiter(bytes: &[u8]) -> u8 {
    let first_line = bytes.split(|&b| b == b'\n').next().unwrap_or_default();
    DELIMITERS
        .iter()
        .copied()
        .max_by_key(|&d| {
            // Ties resolve to the earliest entry, so ',' wins on a single column.
            let count = first_line.iter().filter(|&&b| b == d).count();
            (count, std::cmp::Reverse(DELIMITERS.iter().position(|&x| x == d)))
        })
        .unwrap_or(b',')
}

fn reader(bytes: &[u8]) -> csv::Reader<&[u8]> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .delimiter(detect_delimiter(bytes))
        .from_reader(bytes)
}

fn read_headers(reader: &mut csv::Reader<&[u8]>) -> Result<Vec<String>, IngestError> {
    let record = reader
        .headers()
        .map_err(|e| IngestError::Parse(e.to_string()))?;
    let headers: Vec<String> = record
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let cell = if i == 0 { cell.trim_start_matches(BOM) } else { cell };
            cell.trim().to_string()
        })
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(IngestError::Parse("the file has no header row".into()));
    }
    if let Some(pos) = headers.iter().position(|h| h.is_empty()) {
        return Err(IngestError::Parse(format!(
            "header cell {} must not be empty",
            pos + 1
        )));
    }
    Ok(headers)
}

/// Column names of the header row, in file order.
pub fn list_headers(bytes: &[u8]) -> Result<Vec<String>, IngestError> {
    read_headers(&mut reader(bytes))
}

pub fn read_table(bytes: &[u8]) -> Result<RawTable, IngestError> {
    let mut reader = reader(bytes);
    let headers = read_headers(&mut reader)?;

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    loop {
        match reader.read_record(&mut record) {
            Ok(true) => rows.push(record.iter().map(str::to_string).collect()),
            Ok(false) => break,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or_default();
                return Err(IngestError::Parse(format!("line {line}: {e}")));
            }
        }
    }
    Ok(RawTable { headers, rows })
}
