//! `;`-delimited CSV to JSON rows, with encoding auto-detection.
//!
//! Each data row becomes a JSON object keyed by the header names. Cells
//! beyond the header width get synthetic `_<index>` keys; missing trailing
//! cells are simply absent. Nothing here knows about movies: deciding
//! whether a row is usable is the validator's job.

use serde_json::{Map, Value};
use std::io::Read;
use std::path::Path;

use crate::error::CsvResult;

/// Field separator of the movie list format.
pub const DELIMITER: u8 = b';';

/// Result of parsing with metadata
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    /// Data rows as JSON objects
    pub records: Vec<Value>,
    /// Detected encoding
    pub encoding: String,
    /// Column headers (empty for empty input)
    pub headers: Vec<String>,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }

    let charset = chardet::detect(bytes).0;
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes with the given encoding label.
///
/// Unknown labels and invalid sequences fall back to lossy UTF-8. A leading
/// UTF-8 BOM is dropped.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    match encoding_rs::Encoding::for_label(encoding.as_bytes()) {
        Some(enc) if enc != encoding_rs::UTF_8 => enc.decode_without_bom_handling(bytes).0.into_owned(),
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

/// Parse `;`-delimited CSV from a reader into JSON rows.
///
/// Returns the headers and rows. Records the CSV reader cannot read are
/// skipped like any other unusable row.
pub fn parse_csv<R: Read>(reader: R) -> (Vec<String>, Vec<Value>) {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = reader.records();

    let headers: Vec<String> = match records.next() {
        Some(Ok(header)) => header.iter().map(str::to_string).collect(),
        _ => return (Vec::new(), Vec::new()),
    };

    let rows = records
        .filter_map(Result::ok)
        .map(|record| {
            let mut obj = Map::new();
            for (i, cell) in record.iter().enumerate() {
                let key = headers.get(i).cloned().unwrap_or_else(|| format!("_{i}"));
                obj.insert(key, Value::String(cell.to_string()));
            }
            Value::Object(obj)
        })
        .collect();

    (headers, rows)
}

/// Parse CSV bytes with encoding auto-detection.
pub fn parse_bytes_auto(bytes: &[u8]) -> ParseResult {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    let (headers, records) = parse_csv(content.as_bytes());

    ParseResult {
        records,
        encoding,
        headers,
    }
}

/// Read and parse a CSV file with encoding auto-detection.
pub async fn parse_csv_file_auto<P: AsRef<Path>>(path: P) -> CsvResult<ParseResult> {
    let bytes = tokio::fs::read(path.as_ref()).await?;
    Ok(parse_bytes_auto(&bytes))
}
