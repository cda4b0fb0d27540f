use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{LogError, Result};
use crate::models::{DailyRecord, SummaryRow};

/// Mål-tempo for `targets`: en halv enhet kroppsvekt per uke.
const HALF_UNIT_PER_WEEK: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaintenanceEstimate {
    pub n_days: usize,
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
    pub avg_net: f64,
    pub start_weight: f64,
    pub end_weight: f64,
    pub delta_weight: f64,
    /// kcal/dag som forklarer vektendringen (positiv = overskudd)
    pub daily_gap: f64,
    pub maintenance: f64,
    pub calories_per_unit: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Targets {
    pub maintain: f64,
    pub lose_half: f64,
    pub lose_one: f64,
    pub gain_half: f64,
}

impl MaintenanceEstimate {
    /// Halv enhet per uke = 250 kcal/dag for lbs, 550 for kg.
    pub fn targets(&self) -> Targets {
        let step = self.calories_per_unit * HALF_UNIT_PER_WEEK / 7.0;
        Targets {
            maintain: self.maintenance,
            lose_half: self.maintenance - step,
            lose_one: self.maintenance - 2.0 * step,
            gain_half: self.maintenance + step,
        }
    }
}

/// Snitt netto + det daglige kaloriavviket som forklarer vektendringen.
fn estimate(
    nets: &[f64],
    span: (NaiveDate, NaiveDate),
    start_weight: f64,
    end_weight: f64,
    calories_per_unit: f64,
) -> MaintenanceEstimate {
    let n_days = nets.len();
    let avg_net = nets.iter().sum::<f64>() / n_days as f64;
    let delta_weight = end_weight - start_weight;
    let daily_gap = delta_weight * calories_per_unit / n_days as f64;
    MaintenanceEstimate {
        n_days,
        first_day: span.0,
        last_day: span.1,
        avg_net,
        start_weight,
        end_weight,
        delta_weight,
        daily_gap,
        maintenance: avg_net + daily_gap,
        calories_per_unit,
    }
}

/// Fra dagsloggen: bare dager med mat, trening og vekt teller.
/// Start- og sluttvekt er første og siste slike dag.
pub fn estimate_from_daily(
    records: &[DailyRecord],
    calories_per_unit: f64,
) -> Result<MaintenanceEstimate> {
    let mut complete: Vec<(NaiveDate, f64, f64)> = records
        .iter()
        .filter_map(|r| match (r.food, r.exercise, r.weight) {
            (Some(f), Some(e), Some(w)) => Some((r.date, f - e, w)),
            _ => None,
        })
        .collect();
    complete.sort_by_key(|(d, _, _)| *d);

    let (first, last) = match (complete.first(), complete.last()) {
        (Some(a), Some(b)) if complete.len() >= 2 => (*a, *b),
        _ => {
            return Err(LogError::NotEnoughDays {
                available: complete.len(),
            })
        }
    };

    let nets: Vec<f64> = complete.iter().map(|(_, net, _)| *net).collect();
    Ok(estimate(
        &nets,
        (first.0, last.0),
        first.2,
        last.2,
        calories_per_unit,
    ))
}

/// Fra ukeseksportens Daily Summary; vektene oppgis av brukeren.
pub fn estimate_from_summary(
    rows: &[SummaryRow],
    start_weight: f64,
    end_weight: f64,
    calories_per_unit: f64,
) -> Result<MaintenanceEstimate> {
    let (first, last) = match (rows.first(), rows.last()) {
        (Some(a), Some(b)) if rows.len() >= 2 => (a.date, b.date),
        _ => {
            return Err(LogError::NotEnoughDays {
                available: rows.len(),
            })
        }
    };
    let nets: Vec<f64> = rows.iter().map(|r| r.net as f64).collect();
    Ok(estimate(
        &nets,
        (first, last),
        start_weight,
        end_weight,
        calories_per_unit,
    ))
}
