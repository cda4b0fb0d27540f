use std::path::Path;

use log::{info, warn};

use crate::daily::build_daily_records;
use crate::error::Result;
use crate::loseit::read_daily_summary;
use crate::maintenance::{estimate_from_daily, estimate_from_summary};
use crate::metrics::Metrics;
use crate::one_rm::{best_per_day, load_sets};
use crate::reader::{delimiter_for, read_table};
use crate::schema::{resolve_columns, DAILY_LOG_ALIASES, DAILY_LOG_REQUIRED};
use crate::storage::{load_weekly_table, merge_weekly, save_weekly_table};
use crate::trend::{exercise_history, pr_gaps};
use crate::types::{Cfg, MaintenanceReport, WeeklyRunReport, WorkoutReport};
use crate::weekly::aggregate_weekly;

/// Dagslogg -> ukessnitt -> merge inn i `output`.
///
/// Alt beregnes i minnet før noe skrives; feiler noe underveis står
/// destinasjonen uendret.
pub fn run_weekly_update(
    input: &Path,
    output: &Path,
    metrics: &Metrics,
) -> Result<WeeklyRunReport> {
    // 1️⃣ Les og finn kolonner
    let table = read_table(input, delimiter_for(input))?;
    let columns = resolve_columns(&table.headers, DAILY_LOG_ALIASES, DAILY_LOG_REQUIRED)?;

    // 2️⃣ Dagsrader og ukessnitt
    let (daily, stats) = build_daily_records(&table, &columns);
    let weekly = aggregate_weekly(&daily);
    info!("{} uke(r) beregnet fra {}", weekly.len(), input.display());

    // 3️⃣ Merge med eksisterende tabell og skriv
    let mut persisted = load_weekly_table(output)?;
    let weeks_existing = persisted.len();
    let outcome = merge_weekly(&mut persisted, &weekly);
    save_weekly_table(output, &persisted)?;

    metrics.rows_read.inc_by(stats.rows_read as u64);
    metrics.rows_parsed.inc_by(stats.rows_parsed as u64);
    metrics.rows_skipped.inc_by(stats.rows_skipped() as u64);
    metrics.invalid_numbers.inc_by(stats.invalid_numbers as u64);
    metrics.weeks_added.inc_by(outcome.added as u64);
    metrics.weeks_updated.inc_by(outcome.updated as u64);

    Ok(WeeklyRunReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        columns: columns.to_named(),
        rows_read: stats.rows_read,
        rows_parsed: stats.rows_parsed,
        rows_skipped: stats.rows_skipped(),
        invalid_numbers: stats.invalid_numbers,
        weeks_computed: weekly.len(),
        weeks_existing,
        added: outcome.added,
        updated: outcome.updated,
        unchanged: outcome.unchanged,
        total: outcome.total,
    })
}

/// Sett -> beste 1RM per dag -> PR-gap (+ ev. historikk for én øvelse).
///
/// Med `exercise` satt gir for få økter til PR-statistikk ikke feil her;
/// feilen ligger i `pr_gaps_error` og historikken leveres likevel.
pub fn run_workout_analysis(
    input: &Path,
    exercise: Option<&str>,
    cfg: &Cfg,
    metrics: &Metrics,
) -> Result<WorkoutReport> {
    let formula = cfg.one_rm_formula()?;

    let table = read_table(input, delimiter_for(input))?;
    let (sets, stats) = load_sets(&table, cfg)?;
    metrics.rows_read.inc_by(stats.rows_read as u64);
    metrics.sets_kept.inc_by(stats.sets_kept as u64);
    metrics.sets_filtered.inc_by(stats.sets_filtered() as u64);

    let daily_bests = best_per_day(&sets, formula);

    let history = match exercise {
        Some(name) => Some((name.to_string(), exercise_history(&daily_bests, name, cfg)?)),
        None => None,
    };
    // Historikken skal frem selv om ingen øvelse har nok økter til PR-statistikk
    let (gaps, pr_gaps_error) = match pr_gaps(&daily_bests, cfg) {
        Ok(gaps) => (gaps, None),
        Err(e) if history.is_some() => {
            warn!("⚠️ {}", e);
            (Vec::new(), Some(e.to_string()))
        }
        Err(e) => return Err(e),
    };

    Ok(WorkoutReport {
        input: input.to_path_buf(),
        formula: formula.to_string(),
        rows_read: stats.rows_read,
        sets_kept: stats.sets_kept,
        sets_filtered: stats.sets_filtered(),
        daily_bests,
        pr_gaps: gaps,
        pr_gaps_error,
        history,
    })
}

/// Vedlikeholdsestimat fra dagsloggen (Date, CaloriesIn, ExerciseCals, WeightLbs).
pub fn run_maintenance(input: &Path, cfg: &Cfg, metrics: &Metrics) -> Result<MaintenanceReport> {
    let table = read_table(input, delimiter_for(input))?;
    let columns = resolve_columns(&table.headers, DAILY_LOG_ALIASES, DAILY_LOG_REQUIRED)?;
    let (daily, stats) = build_daily_records(&table, &columns);
    metrics.rows_read.inc_by(stats.rows_read as u64);
    metrics.rows_parsed.inc_by(stats.rows_parsed as u64);
    metrics.rows_skipped.inc_by(stats.rows_skipped() as u64);

    let estimate = estimate_from_daily(&daily, cfg.kcal_per_unit())?;
    Ok(MaintenanceReport {
        input: input.to_path_buf(),
        rows_read: stats.rows_read,
        days_used: estimate.n_days,
        unit: cfg.unit,
        estimate,
    })
}

/// Vedlikeholdsestimat fra ukeseksportens Daily Summary.
pub fn run_weekly_export(
    input: &Path,
    start_weight: f64,
    end_weight: f64,
    cfg: &Cfg,
) -> Result<MaintenanceReport> {
    let rows = read_daily_summary(input)?;
    let estimate =
        estimate_from_summary(&rows, start_weight, end_weight, cfg.kcal_per_unit())?;
    Ok(MaintenanceReport {
        input: input.to_path_buf(),
        rows_read: rows.len(),
        days_used: estimate.n_days,
        unit: cfg.unit,
        estimate,
    })
}
