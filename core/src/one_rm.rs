use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use log::{debug, info};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{LogError, Result};
use crate::models::{DailyBestRecord, SetRecord};
use crate::normalize::{parse_date, parse_number, CellKind, NumberCell};
use crate::reader::Table;
use crate::schema::{resolve_columns, Field, WORKOUT_ALIASES, WORKOUT_REQUIRED};
use crate::types::Cfg;

/// Brzycki-nevneren (37 - reps) må holdes positiv.
pub const BRZYCKI_MAX_REPS: u32 = 36;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OneRmFormula {
    Epley,
    Brzycki,
}

impl FromStr for OneRmFormula {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "epley" => Ok(OneRmFormula::Epley),
            "brzycki" => Ok(OneRmFormula::Brzycki),
            _ => Err(LogError::UnknownFormula(s.to_string())),
        }
    }
}

impl fmt::Display for OneRmFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OneRmFormula::Epley => f.write_str("epley"),
            OneRmFormula::Brzycki => f.write_str("brzycki"),
        }
    }
}

/// Estimert 1RM fra ett sett. Ved reps <= 1 er estimatet selve vekta.
pub fn estimate_1rm(weight: f64, reps: u32, formula: OneRmFormula) -> f64 {
    if reps <= 1 {
        return weight;
    }
    match formula {
        OneRmFormula::Epley => weight * (1.0 + f64::from(reps) / 30.0),
        OneRmFormula::Brzycki => {
            let r = reps.min(BRZYCKI_MAX_REPS);
            weight * 36.0 / (37.0 - f64::from(r))
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SetStats {
    pub rows_read: usize,
    pub sets_kept: usize,
    /// ugyldig dato/vekt/reps eller tomt øvelsesnavn
    pub rows_invalid: usize,
    /// reps utenfor [min_reps, max_reps]
    pub reps_out_of_range: usize,
}

impl SetStats {
    pub fn sets_filtered(&self) -> usize {
        self.rows_invalid + self.reps_out_of_range
    }
}

/// Leser sett fra en treningseksport (Date / Exercise Name / Weight / Reps).
///
/// Rader med ugyldig dato, vekt eller reps droppes. Reps utenfor
/// `cfg.min_reps..=cfg.max_reps` filtreres bort (ikke klemt), siden
/// 1RM-estimatet ikke er til å stole på for lange sett.
pub fn load_sets(table: &Table, cfg: &Cfg) -> Result<(Vec<SetRecord>, SetStats)> {
    let columns = resolve_columns(&table.headers, WORKOUT_ALIASES, WORKOUT_REQUIRED)?;
    let col = |f: Field| columns.get(f).unwrap_or_default();
    let (date_col, name_col, weight_col, reps_col) = (
        col(Field::Date),
        col(Field::ExerciseName),
        col(Field::Weight),
        col(Field::Reps),
    );

    let mut stats = SetStats {
        rows_read: table.rows.len(),
        ..Default::default()
    };
    let mut sets = Vec::with_capacity(table.rows.len());

    for row in &table.rows {
        let cell = |h: &str| row.get(h).map(String::as_str).unwrap_or("");

        let date = match parse_date(cell(date_col)) {
            Ok(d) => d,
            Err(e) => {
                debug!("hopper over sett: {}", e);
                stats.rows_invalid += 1;
                continue;
            }
        };
        let name = cell(name_col).trim();
        let weight = parse_number(cell(weight_col), CellKind::Measurement);
        let reps = parse_number(cell(reps_col), CellKind::Measurement);

        let (weight, reps) = match (weight, reps) {
            (NumberCell::Value(w), NumberCell::Value(r)) if !name.is_empty() && r >= 0.0 => {
                (w, r.trunc() as u32)
            }
            _ => {
                stats.rows_invalid += 1;
                continue;
            }
        };

        if reps < cfg.min_reps || reps > cfg.max_reps {
            stats.reps_out_of_range += 1;
            continue;
        }

        let weight = if cfg.convert_kg_to_lbs {
            weight * cfg.kg_to_lbs
        } else {
            weight
        };

        sets.push(SetRecord {
            date,
            exercise_name: name.to_string(),
            weight,
            reps,
        });
    }

    stats.sets_kept = sets.len();
    info!(
        "sett: {} rader lest, {} beholdt, {} filtrert",
        stats.rows_read,
        stats.sets_kept,
        stats.sets_filtered()
    );
    Ok((sets, stats))
}

/// Beste estimerte 1RM per (øvelse, dato). Oppvarming og nedtrapping
/// forsvinner, slik at trenden viser toppinnsatsen per økt.
/// Sortert på øvelsesnavn, deretter dato.
pub fn best_per_day(sets: &[SetRecord], formula: OneRmFormula) -> Vec<DailyBestRecord> {
    let mut best: BTreeMap<(&str, NaiveDate), OrderedFloat<f64>> = BTreeMap::new();

    for s in sets {
        let est = OrderedFloat(estimate_1rm(s.weight, s.reps, formula));
        best.entry((s.exercise_name.as_str(), s.date))
            .and_modify(|cur| *cur = (*cur).max(est))
            .or_insert(est);
    }

    best.into_iter()
        .map(|((name, date), est)| DailyBestRecord {
            date,
            exercise_name: name.to_string(),
            estimated_1rm: est.into_inner(),
        })
        .collect()
}
