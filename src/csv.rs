//! CSV import and export of submission tables
//!
//! Reading is done by a small quote-aware state machine rather than a strict
//! RFC 4180 reader: spreadsheet exports and hand-edited files regularly carry
//! stray quotes and ragged lines, and those must still load. Writing goes
//! through the `csv` crate with minimal quoting.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::mem;
use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::column::Column;
use crate::error::{Result, SeminarError};
use crate::row::Row;
use crate::schema::Schema;
use crate::table::Table;

/// Options for reading/writing CSV bytes
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Text encoding of the file
    pub encoding: Encoding,
}

/// Text encoding options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// UTF-8. A leading byte order mark is ignored
    Utf8,
    /// Windows-1252, as produced by older spreadsheet exports
    Windows1252,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            encoding: Encoding::Utf8,
        }
    }
}

impl CsvOptions {
    /// Options for files saved by desktop spreadsheet software
    pub fn spreadsheet_export() -> Self {
        Self {
            encoding: Encoding::Windows1252,
        }
    }
}

/// A parsed CSV file before it is bound to a schema
///
/// Header names are kept as they appear in the file (trimmed), so columns
/// that no schema knows about are still visible here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvDocument {
    headers: Vec<String>,
    records: Vec<IndexMap<String, String>>,
}

impl CsvDocument {
    /// Header names, in file order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data records keyed by header name
    pub fn records(&self) -> &[IndexMap<String, String>] {
        &self.records
    }

    /// Number of data records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if there are no data records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Convert the records to rows projected onto a schema
    ///
    /// Headers that are not a known column are dropped, schema columns the
    /// file does not have are set to the empty string.
    pub fn into_rows(self, schema: Schema) -> Vec<Row> {
        let CsvDocument { headers, records } = self;

        // Resolved once per file, not per record
        let columns: Vec<(&str, Column)> = headers
            .iter()
            .filter_map(|header| match Column::from_name(header) {
                Some(column) if schema.contains(column) => Some((header.as_str(), column)),
                Some(_) => {
                    debug!(column = %header, %schema, "column not in schema, dropping");
                    None
                }
                None => {
                    debug!(column = %header, "unknown column, dropping");
                    None
                }
            })
            .collect();

        records
            .into_iter()
            .map(|mut record| {
                columns
                    .iter()
                    .filter_map(|&(header, column)| {
                        record.swap_remove(header).map(|value| (column, value))
                    })
                    .collect::<Row>()
                    .project(schema)
            })
            .collect()
    }

    /// Convert the records to a table for a schema
    pub fn into_table(self, schema: Schema) -> Table {
        Table::from_rows(schema, self.into_rows(schema))
    }
}

/// Whitespace and byte order marks around a header name
fn is_header_padding(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Parse CSV text
///
/// The first non-empty record is the header. Records are separated by `\n`
/// or `\r\n` outside of quotes and blank records are skipped. Every data
/// record maps each header to the field at the same position; missing
/// trailing fields become empty strings and fields past the last header are
/// dropped.
///
/// Malformed input never fails. A quote left open runs to the end of the
/// input, as if it had been closed there.
pub fn parse_csv(text: &str) -> CsvDocument {
    let mut records = split_records(text).into_iter();

    let Some(header) = records.next() else {
        return CsvDocument::default();
    };

    let headers: Vec<String> = header
        .iter()
        .map(|name| name.trim_matches(is_header_padding).to_string())
        .collect();

    let records: Vec<IndexMap<String, String>> = records
        .enumerate()
        .map(|(index, fields)| {
            if fields.len() > headers.len() {
                debug!(
                    record = index + 1,
                    fields = fields.len(),
                    headers = headers.len(),
                    "dropping fields past the last header"
                );
            }

            let mut fields = fields.into_iter();
            headers
                .iter()
                .map(|name| (name.clone(), fields.next().unwrap_or_default()))
                .collect()
        })
        .collect();

    CsvDocument { headers, records }
}

/// Split text into records of raw field values
fn split_records(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    // Set once the current record has any content, blank lines stay unset
    let mut started = false;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' if quoted && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
                started = true;
            }
            '"' => {
                quoted = !quoted;
                started = true;
            }
            ',' if !quoted => {
                fields.push(mem::take(&mut current));
                started = true;
            }
            '\r' if !quoted && chars.peek() == Some(&'\n') => {}
            '\n' if !quoted => {
                if started {
                    fields.push(mem::take(&mut current));
                    records.push(mem::take(&mut fields));
                }
                started = false;
            }
            _ => {
                current.push(ch);
                started = true;
            }
        }
    }

    if quoted {
        warn!("unterminated quoted field, closing it at end of input");
    }
    if started {
        fields.push(current);
        records.push(fields);
    }

    records
}

/// Serialize rows to CSV text for a schema
///
/// The header is the schema's column names. Each row contributes its values
/// for those columns in schema order, absent columns written as empty
/// fields. A field is quoted, with inner quotes doubled, only when it holds
/// a comma, a quote or a line break. Lines end in `\n` and trailing
/// whitespace is trimmed from the result, so an empty row list gives just
/// the header line.
pub fn to_csv_string(rows: &[Row], schema: Schema) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(schema.header())?;
    for row in rows {
        writer.write_record(row.values_for(schema))?;
    }

    let bytes = writer.into_inner()?;
    let text = String::from_utf8(bytes).map_err(|e| SeminarError::EncodingError(e.to_string()))?;
    Ok(text.trim_end().to_string())
}

/// Read a table from CSV text
pub fn from_csv_str(text: &str, schema: Schema) -> Table {
    parse_csv(text).into_table(schema)
}

/// Read a table from CSV bytes
///
/// # Errors
/// - `SeminarError::EncodingError` if the bytes are not valid in the chosen encoding
pub fn from_csv_bytes(bytes: &[u8], options: &CsvOptions, schema: Schema) -> Result<Table> {
    let text = decode_string(bytes, options.encoding)?;
    Ok(from_csv_str(&text, schema))
}

/// Read a table from a CSV file
///
/// # Arguments
/// - `path` - The path to the CSV file to read
/// - `options` - Encoding of the file
/// - `schema` - The schema the rows are projected onto. Columns of the file outside of it are dropped
pub fn from_csv<P: AsRef<Path>>(path: P, options: &CsvOptions, schema: Schema) -> Result<Table> {
    let bytes = std::fs::read(path)?;
    from_csv_bytes(&bytes, options, schema)
}

/// Serialize a table to CSV bytes in the chosen encoding
pub fn to_csv_bytes(table: &Table, options: &CsvOptions) -> Result<Vec<u8>> {
    let text = table.to_csv_string()?;
    encode_string(&text, options.encoding)
}

/// Write a table to a CSV file
///
/// # Arguments
/// - `table` - The table to export
/// - `path` - The path to the CSV file to write
/// - `options` - Encoding of the file
pub fn to_csv<P: AsRef<Path>>(table: &Table, path: P, options: &CsvOptions) -> Result<()> {
    let bytes = to_csv_bytes(table, options)?;
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

fn decode_string(bytes: &[u8], encoding: Encoding) -> Result<String> {
    match encoding {
        Encoding::Utf8 => {
            let (decoded, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(bytes);
            if had_errors {
                return Err(SeminarError::EncodingError(
                    "input is not valid UTF-8".to_string(),
                ));
            }
            Ok(decoded.into_owned())
        }
        Encoding::Windows1252 => {
            // Every byte maps to a character, decoding cannot fail
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            Ok(decoded.into_owned())
        }
    }
}

fn encode_string(s: &str, encoding: Encoding) -> Result<Vec<u8>> {
    match encoding {
        Encoding::Utf8 => Ok(s.as_bytes().to_vec()),
        Encoding::Windows1252 => {
            let (encoded, _, had_errors) = encoding_rs::WINDOWS_1252.encode(s);
            if had_errors {
                return Err(SeminarError::EncodingError(
                    "text has characters that Windows-1252 cannot represent".to_string(),
                ));
            }
            Ok(encoded.into_owned())
        }
    }
}
