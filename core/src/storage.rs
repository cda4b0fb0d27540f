use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Serialize;

use crate::error::{LogError, Result};
use crate::models::{WeeklyAggregate, WeeklyRow};
use crate::reader::{delimiter_for, read_table};
use crate::types::Cfg;

pub const WEEKLY_HEADERS: [&str; 5] = [
    "week_start",
    "avg_weight",
    "avg_food",
    "avg_exercise",
    "avg_net",
];

/// week_start -> formatert rad, alltid sortert på nøkkel.
pub type PersistedTable = BTreeMap<String, WeeklyRow>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeOutcome {
    pub added: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub total: usize,
}

/// Leser inn eksisterende ukestabell.
/// Hvis filen ikke finnes, returneres en tom tabell.
pub fn load_weekly_table(path: &Path) -> Result<PersistedTable> {
    if !path.exists() {
        info!("⚠️ Fant ikke {}, starter med tom tabell", path.display());
        return Ok(PersistedTable::new());
    }

    let table = read_table(path, delimiter_for(path))?;
    if !table.headers.iter().any(|h| h == WEEKLY_HEADERS[0]) {
        return Err(LogError::MissingHeader {
            path: path.to_path_buf(),
            expected: WEEKLY_HEADERS.join(","),
        });
    }

    let mut out = PersistedTable::new();
    for row in &table.rows {
        let get = |k: &str| row.get(k).map(|s| s.trim().to_string()).unwrap_or_default();
        let week_start = get("week_start");
        if week_start.is_empty() {
            continue;
        }
        out.insert(
            week_start.clone(),
            WeeklyRow {
                week_start,
                avg_weight: get("avg_weight"),
                avg_food: get("avg_food"),
                avg_exercise: get("avg_exercise"),
                avg_net: get("avg_net"),
            },
        );
    }

    info!("📂 {} uker lastet fra {}", out.len(), path.display());
    Ok(out)
}

/// Setter inn nye uker og retter eksisterende. Uker som ikke finnes i
/// `weekly` blir stående urørt.
pub fn merge_weekly(table: &mut PersistedTable, weekly: &[WeeklyAggregate]) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();

    for agg in weekly {
        let row = agg.to_row();
        match table.entry(row.week_start.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(row);
                outcome.added += 1;
            }
            Entry::Occupied(mut slot) => {
                if *slot.get() != row {
                    slot.insert(row);
                    outcome.updated += 1;
                } else {
                    outcome.unchanged += 1;
                }
            }
        }
    }

    outcome.total = table.len();
    outcome
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Skriver hele tabellen på nytt (header + rader sortert på week_start).
/// Skrives til en midlertidig fil først og flyttes deretter over destinasjonen.
pub fn save_weekly_table(path: &Path, table: &PersistedTable) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| LogError::io(dir, e))?;
    }

    let tmp = temp_path(path);
    let file = File::create(&tmp).map_err(|e| LogError::io(&tmp, e))?;
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter_for(path))
        .from_writer(file);

    wtr.write_record(WEEKLY_HEADERS)
        .map_err(|e| LogError::csv(&tmp, e))?;
    for row in table.values() {
        wtr.write_record([
            &row.week_start,
            &row.avg_weight,
            &row.avg_food,
            &row.avg_exercise,
            &row.avg_net,
        ])
        .map_err(|e| LogError::csv(&tmp, e))?;
    }

    wtr.flush().map_err(|e| LogError::io(&tmp, e))?;
    let file = wtr.into_inner().map_err(|e| {
        LogError::io(&tmp, std::io::Error::new(e.error().kind(), e.error().to_string()))
    })?;
    file.sync_all().map_err(|e| LogError::io(&tmp, e))?;
    drop(file);

    fs::rename(&tmp, path).map_err(|e| LogError::io(path, e))?;
    info!("✅ {} uker skrevet til {}", table.len(), path.display());
    Ok(())
}

/// Leser inn konfigurasjon fra disk (JSON).
/// Hvis filen ikke finnes, returneres default-konfigurasjonen.
pub fn load_cfg(path: &Path) -> Result<Cfg> {
    if !path.exists() {
        warn!(
            "⚠️ Fant ikke konfigurasjon på {}, bruker default",
            path.display()
        );
        return Ok(Cfg::default());
    }

    let contents = fs::read_to_string(path).map_err(|e| LogError::io(path, e))?;
    let mut de = serde_json::Deserializer::from_str(&contents);
    let cfg: Cfg = serde_path_to_error::deserialize(&mut de).map_err(|e| LogError::Config {
        path: e.path().to_string(),
        message: e.inner().to_string(),
    })?;

    // Ukjent formel skal stoppe kjøringen før noe leses
    cfg.one_rm_formula()?;
    info!("📂 Konfigurasjon lastet fra {} (formel={})", path.display(), cfg.formula);
    Ok(cfg)
}
