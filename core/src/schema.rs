use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::NaiveDate;
use log::debug;

use crate::error::{LogError, Result};
use crate::normalize::parse_date;

/// Kanoniske felt, uavhengig av hva fila kaller kolonnene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Date,
    Food,
    Exercise,
    Weight,
    ExerciseName,
    Reps,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Date => "date",
            Field::Food => "food",
            Field::Exercise => "exercise",
            Field::Weight => "weight",
            Field::ExerciseName => "exercise_name",
            Field::Reps => "reps",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type AliasTable = &'static [(Field, &'static [&'static str])];

/// Dagslogg (kalorier/vekt). Første alias som treffer vinner.
pub const DAILY_LOG_ALIASES: AliasTable = &[
    (Field::Date, &["date", "day", "entry_date", "log_date", "timestamp"]),
    (
        Field::Food,
        &["food", "calories", "cals", "kcal", "intake", "eaten", "caloriesin"],
    ),
    (
        Field::Exercise,
        &[
            "exercise",
            "exer",
            "exer.",
            "burned",
            "calories_burned",
            "activity",
            "exercisecals",
        ],
    ),
    (
        Field::Weight,
        &["weight", "weight_lbs", "lbs", "bodyweight", "scale_weight", "weightlbs"],
    ),
];

pub const DAILY_LOG_REQUIRED: &[Field] = &[Field::Date];

/// Treningslogg-eksport (ett sett per rad).
pub const WORKOUT_ALIASES: AliasTable = &[
    (Field::Date, &["date", "workout_date", "day"]),
    (
        Field::ExerciseName,
        &["exercise_name", "exercise", "movement", "lift"],
    ),
    (Field::Weight, &["weight", "weight_lbs", "weight_kg", "load"]),
    (Field::Reps, &["reps", "repetitions", "rep_count"]),
];

pub const WORKOUT_REQUIRED: &[Field] = &[
    Field::Date,
    Field::ExerciseName,
    Field::Weight,
    Field::Reps,
];

/// trim + små bokstaver + mellomrom -> '_'
pub fn normalize_header(h: &str) -> String {
    h.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// Felt -> faktisk header. Bygges én gang per fil.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    map: BTreeMap<Field, String>,
}

impl ColumnMap {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.map.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.map.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.map.iter().map(|(f, h)| (*f, h.as_str()))
    }

    /// For rapporter: "food" -> "Food"
    pub fn to_named(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(f, h)| (f.as_str().to_string(), h.to_string()))
            .collect()
    }
}

pub fn resolve_columns(
    headers: &[String],
    aliases: AliasTable,
    required: &[Field],
) -> Result<ColumnMap> {
    let mut norm_to_original: HashMap<String, &str> = HashMap::new();
    for h in headers {
        // like normaliserte headere: den første vinner
        norm_to_original
            .entry(normalize_header(h))
            .or_insert(h.as_str());
    }

    let mut map = BTreeMap::new();
    for (field, alias_list) in aliases {
        let hit = alias_list
            .iter()
            .find_map(|a| norm_to_original.get(&normalize_header(a)));
        if let Some(original) = hit {
            debug!("kolonne {} -> '{}'", field, original);
            map.insert(*field, (*original).to_string());
        }
    }

    let missing: Vec<String> = required
        .iter()
        .filter(|f| !map.contains_key(*f))
        .map(|f| f.as_str().to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LogError::MissingColumns {
            missing,
            found: headers.to_vec(),
        });
    }

    Ok(ColumnMap { map })
}

// ──────────────────────────────────────────────────────────────────────────────
// "Daily Summary"-seksjonen i ukeseksporten
// ──────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    BeforeTable,
    InTable,
    Done,
}

/// Tilstandsmaskin som finner og avgrenser "Daily Summary"-tabellen.
///
/// Header-raden kjennes igjen på tom første celle, `Budget` i kolonne 2 og
/// `Food...` i kolonne 3. Tabellen slutter stille ved første rad som ikke har
/// en dato i første celle (tom celle, "Totals", "...calories...", "Nutrients").
#[derive(Debug, Clone)]
pub struct DailySummaryScanner {
    state: ScanState,
}

impl Default for DailySummaryScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl DailySummaryScanner {
    pub fn new() -> Self {
        Self {
            state: ScanState::BeforeTable,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    fn is_sentinel(cells: &[String]) -> bool {
        cells.len() >= 3
            && cells[0].trim().is_empty()
            && cells[1].trim() == "Budget"
            && cells[2].trim().starts_with("Food")
    }

    fn is_terminator(first: &str) -> bool {
        let lower = first.to_lowercase();
        first.is_empty()
            || lower.starts_with("totals")
            || lower.contains("calories")
            || first == "Nutrients"
    }

    /// Mater inn én rad. Returnerer datoen når raden er en datarad i tabellen.
    pub fn feed(&mut self, cells: &[String]) -> Option<NaiveDate> {
        if cells.is_empty() {
            return None;
        }
        match self.state {
            ScanState::BeforeTable => {
                if Self::is_sentinel(cells) {
                    debug!("fant Daily Summary-header");
                    self.state = ScanState::InTable;
                }
                None
            }
            ScanState::InTable => {
                let first = cells[0].trim();
                if Self::is_terminator(first) {
                    self.state = ScanState::Done;
                    return None;
                }
                match parse_date(first) {
                    Ok(d) => Some(d),
                    Err(_) => {
                        self.state = ScanState::Done;
                        None
                    }
                }
            }
            ScanState::Done => None,
        }
    }
}
