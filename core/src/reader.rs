use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{debug, warn};

use crate::error::{LogError, Result};

/// header -> celle, slik den står i fila.
pub type RawRow = HashMap<String, String>;

#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// TAB for .tab/.tsv-eksporter, ellers komma.
pub fn delimiter_for(path: &Path) -> u8 {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("tab") | Some("tsv") => b'\t',
        _ => b',',
    }
}

/// Leser hele fila, fjerner BOM og dekoder tolerant (ugyldige bytes erstattes).
fn read_text(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(LogError::InputMissing(path.to_path_buf()));
    }
    let bytes = fs::read(path).map_err(|e| LogError::io(path, e))?;
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);
    Ok(String::from_utf8_lossy(body).into_owned())
}

/// Leser en avgrenset fil med header-rad.
pub fn read_table(path: &Path, delimiter: u8) -> Result<Table> {
    let text = read_text(path)?;
    let table = parse_table(&text, delimiter).map_err(|e| LogError::csv(path, e))?;
    debug!(
        "leste {} rader og {} kolonner fra {}",
        table.rows.len(),
        table.headers.len(),
        path.display()
    );
    Ok(table)
}

/// Parser tekst med header-rad. Headere trimmes; korte rader gir manglende nøkler.
pub fn parse_table(text: &str, delimiter: u8) -> std::result::Result<Table, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let mut row = RawRow::with_capacity(headers.len());
        for (header, cell) in headers.iter().zip(record.iter()) {
            // Dupliserte headere: første kolonne vinner
            row.entry(header.clone())
                .or_insert_with(|| cell.to_string());
        }
        rows.push(row);
    }

    if headers.len() == 1 && !rows.is_empty() {
        warn!(
            "fila ble lest som én kolonne ({:?}) – feil skilletegn?",
            headers[0]
        );
    }

    Ok(Table { headers, rows })
}

/// Leser rader uten header, med varierende lengde (fler-seksjons-dokumenter).
pub fn read_records(path: &Path, delimiter: u8) -> Result<Vec<Vec<String>>> {
    let text = read_text(path)?;
    parse_records(&text, delimiter).map_err(|e| LogError::csv(path, e))
}

pub fn parse_records(
    text: &str,
    delimiter: u8,
) -> std::result::Result<Vec<Vec<String>>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut out = Vec::new();
    for record in rdr.records() {
        let record = record?;
        out.push(record.iter().map(str::to_string).collect());
    }
    Ok(out)
}
