use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::maintenance::MaintenanceEstimate;
use crate::models::{DailyBestRecord, HistoryPoint, PrStat};
use crate::one_rm::OneRmFormula;

/// Vektenhet for vedlikeholdsestimatet: styrer både etikett og kcal per enhet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Lbs,
    Kg,
}

impl WeightUnit {
    pub fn label(self) -> &'static str {
        match self {
            WeightUnit::Lbs => "lbs",
            WeightUnit::Kg => "kg",
        }
    }

    /// Energi per enhet kroppsvekt (3500 kcal/lb, 7700 kcal/kg).
    pub fn calories_per_unit(self) -> f64 {
        match self {
            WeightUnit::Lbs => 3500.0,
            WeightUnit::Kg => 7700.0,
        }
    }
}

/// Kjørekonfigurasjon. Sendes eksplisitt inn i hver beregning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Cfg {
    pub formula: String,            // "epley" | "brzycki"
    pub min_reps: u32,              // typ 1
    pub max_reps: u32,              // typ 20
    pub min_sessions: usize,        // typ 6
    pub top_n: usize,               // typ 20
    pub convert_kg_to_lbs: bool,
    pub kg_to_lbs: f64,
    pub unit: WeightUnit,
    pub calories_per_unit: Option<f64>, // overstyrer enhetens standardverdi
    pub suggestion_limit: usize,
}

impl Default for Cfg {
    fn default() -> Self {
        Self {
            formula: "epley".to_string(),
            min_reps: 1,
            max_reps: 20,
            min_sessions: 6,
            top_n: 20,
            convert_kg_to_lbs: false,
            kg_to_lbs: 2.2046226218,
            unit: WeightUnit::Lbs,
            calories_per_unit: None,
            suggestion_limit: 30,
        }
    }
}

impl Cfg {
    /// Valgt 1RM-formel. Ukjent navn er en fatal konfigurasjonsfeil.
    pub fn one_rm_formula(&self) -> Result<OneRmFormula> {
        self.formula.parse()
    }

    /// kcal per enhet kroppsvekt for valgt enhet, med ev. overstyring fra fila.
    pub fn kcal_per_unit(&self) -> f64 {
        self.calories_per_unit
            .unwrap_or_else(|| self.unit.calories_per_unit())
    }
}

/// Sammendrag av én ukes-oppdatering (vises for brukeren).
#[derive(Debug, Clone, Default, Serialize)]
pub struct WeeklyRunReport {
    pub input: PathBuf,
    pub output: PathBuf,
    /// kanonisk felt -> faktisk header
    pub columns: BTreeMap<String, String>,
    pub rows_read: usize,
    pub rows_parsed: usize,
    pub rows_skipped: usize,
    pub invalid_numbers: usize,
    pub weeks_computed: usize,
    pub weeks_existing: usize,
    pub added: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct WorkoutReport {
    pub input: PathBuf,
    pub formula: String,
    pub rows_read: usize,
    pub sets_kept: usize,
    pub sets_filtered: usize,
    pub daily_bests: Vec<DailyBestRecord>,
    pub pr_gaps: Vec<PrStat>,
    /// Satt når PR-statistikken ikke kunne lages, men historikken ble levert.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pr_gaps_error: Option<String>,
    pub history: Option<(String, Vec<HistoryPoint>)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MaintenanceReport {
    pub input: PathBuf,
    pub rows_read: usize,
    pub days_used: usize,
    pub unit: WeightUnit,
    pub estimate: MaintenanceEstimate,
}
