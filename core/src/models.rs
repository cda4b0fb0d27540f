use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Én dag fra dagsloggen. `None` betyr "ukjent" (kolonne mangler eller
/// cellen kunne ikke tolkes) – aldri 0, siden 0 er en gyldig verdi for trening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub weight: Option<f64>,   // lbs (eller kg, slik fila er ført)
    pub food: Option<f64>,     // kcal inn
    pub exercise: Option<f64>, // kcal forbrent
}

/// Snitt for én uke (mandag–søndag).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyAggregate {
    /// Alltid en mandag.
    pub week_start: NaiveDate,
    pub avg_weight: Option<f64>,
    pub avg_food: Option<f64>,
    pub avg_exercise: Option<f64>,
    /// Snitt av (food - exercise) over dager der begge finnes.
    pub avg_net: Option<f64>,
}

/// Formatert rad slik den ligger i weight_history.csv.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyRow {
    pub week_start: String,
    pub avg_weight: String,
    pub avg_food: String,
    pub avg_exercise: String,
    pub avg_net: String,
}

/// Ett sett fra treningsloggen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetRecord {
    pub date: NaiveDate,
    pub exercise_name: String,
    pub weight: f64,
    pub reps: u32,
}

/// Beste estimerte 1RM for en (dato, øvelse).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBestRecord {
    pub date: NaiveDate,
    pub exercise_name: String,
    pub estimated_1rm: f64,
}

/// Ett punkt i historikken til én øvelse (input til graf-tegning).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub estimated_1rm: f64,
    pub running_pr: f64,
    pub is_pr: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrStat {
    pub exercise_name: String,
    pub session_count: usize,
    pub pr_value: f64,
    pub pr_date: NaiveDate,
    pub last_session_date: NaiveDate,
    pub days_since_pr: i64,
}

/// Rad fra "Daily Summary"-tabellen i ukeseksporten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub date: NaiveDate,
    pub budget: i64,
    pub food: i64,
    pub exercise: i64,
    pub net: i64,
    pub plus_minus: i64,
}
