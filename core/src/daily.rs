use log::{debug, info};
use serde::Serialize;

use crate::models::DailyRecord;
use crate::normalize::{parse_date, parse_number, CellKind, NumberCell};
use crate::reader::{RawRow, Table};
use crate::schema::{ColumnMap, Field};

/// Tellere fra bygging av dagsrader (vises i sammendraget).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub rows_read: usize,
    pub rows_parsed: usize,
    pub skipped_blank_date: usize,
    pub skipped_bad_date: usize,
    pub invalid_numbers: usize,
}

impl BuildStats {
    pub fn rows_skipped(&self) -> usize {
        self.skipped_blank_date + self.skipped_bad_date
    }
}

/// Strekkonvensjon for dagsloggen: bare trening er en tellekolonne
/// (strek = 0 kcal forbrent). Mat og vekt med strek er ukjent.
fn cell_kind(field: Field) -> CellKind {
    match field {
        Field::Exercise => CellKind::Count,
        _ => CellKind::Measurement,
    }
}

fn read_field(
    row: &RawRow,
    columns: &ColumnMap,
    field: Field,
    stats: &mut BuildStats,
) -> Option<f64> {
    let header = columns.get(field)?;
    let raw = row.get(header).map(String::as_str).unwrap_or("");
    match parse_number(raw, cell_kind(field)) {
        NumberCell::Value(v) => Some(v),
        NumberCell::Empty => None,
        NumberCell::Invalid => {
            debug!("ugyldig tall i {}: '{}'", field, raw);
            stats.invalid_numbers += 1;
            None
        }
    }
}

/// Rad -> DailyRecord. Rader uten gyldig dato droppes og telles.
pub fn build_daily_records(table: &Table, columns: &ColumnMap) -> (Vec<DailyRecord>, BuildStats) {
    let mut stats = BuildStats {
        rows_read: table.rows.len(),
        ..Default::default()
    };
    let mut out = Vec::with_capacity(table.rows.len());

    let date_header = match columns.get(Field::Date) {
        Some(h) => h,
        None => return (out, stats),
    };

    for row in &table.rows {
        let raw_date = row.get(date_header).map(|s| s.trim()).unwrap_or("");
        if raw_date.is_empty() {
            stats.skipped_blank_date += 1;
            continue;
        }
        let date = match parse_date(raw_date) {
            Ok(d) => d,
            Err(e) => {
                debug!("hopper over rad: {}", e);
                stats.skipped_bad_date += 1;
                continue;
            }
        };

        let weight = read_field(row, columns, Field::Weight, &mut stats);
        let food = read_field(row, columns, Field::Food, &mut stats);
        let exercise = read_field(row, columns, Field::Exercise, &mut stats);

        out.push(DailyRecord {
            date,
            weight,
            food,
            exercise,
        });
    }

    stats.rows_parsed = out.len();
    info!(
        "dagsrader: {} lest, {} tolket, {} hoppet over",
        stats.rows_read,
        stats.rows_parsed,
        stats.rows_skipped()
    );
    (out, stats)
}
