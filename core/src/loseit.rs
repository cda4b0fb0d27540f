use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use log::{debug, info};

use crate::error::{LogError, Result};
use crate::models::SummaryRow;
use crate::normalize::parse_int_like;
use crate::reader::{delimiter_for, read_records};
use crate::schema::DailySummaryScanner;

/// Plukker ut "Daily Summary"-radene fra en ukeseksport med flere seksjoner.
/// Kolonner etter dato: Budget, Food, Exercise, Net, +/-. Manglende celler = 0.
pub fn summary_from_records(records: &[Vec<String>]) -> Vec<SummaryRow> {
    let mut scanner = DailySummaryScanner::new();
    let mut out = Vec::new();

    for row in records {
        let Some(date) = scanner.feed(row) else {
            continue;
        };
        let cell = |i: usize| row.get(i).map(|s| parse_int_like(s)).unwrap_or(0);
        out.push(SummaryRow {
            date,
            budget: cell(1),
            food: cell(2),
            exercise: cell(3),
            net: cell(4),
            plus_minus: cell(5),
        });
    }

    debug!("scanner endte i {:?}", scanner.state());
    out
}

pub fn read_daily_summary(path: &Path) -> Result<Vec<SummaryRow>> {
    let records = read_records(path, delimiter_for(path))?;
    let rows = summary_from_records(&records);
    info!(
        "Daily Summary: {} dager fra {}",
        rows.len(),
        path.display()
    );
    Ok(rows)
}

/// Nyeste .csv i `dir` (etter endringstid). daily_log*.csv ignoreres.
pub fn find_latest_export(dir: &Path) -> Result<Option<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| LogError::io(dir, e))?;

    let mut newest: Option<(SystemTime, PathBuf)> = None;
    for entry in entries {
        let entry = entry.map_err(|e| LogError::io(dir, e))?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_lowercase();
        if !name.ends_with(".csv") || name.starts_with("daily_log") || !path.is_file() {
            continue;
        }
        let modified = entry
            .metadata()
            .and_then(|m| m.modified())
            .map_err(|e| LogError::io(&path, e))?;
        if newest.as_ref().map_or(true, |(t, _)| modified > *t) {
            newest = Some((modified, path));
        }
    }

    Ok(newest.map(|(_, p)| p))
}
