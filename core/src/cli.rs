use crate::maintenance::MaintenanceEstimate;
use crate::models::{HistoryPoint, PrStat};
use crate::types::{MaintenanceReport, WeeklyRunReport, WorkoutReport};

pub fn print_weekly_report(r: &WeeklyRunReport) {
    println!("--- Weekly Update ---");
    println!("Input file:  {}", r.input.display());
    println!("Output file: {}", r.output.display());
    println!();
    println!("Read {} rows", r.rows_read);
    println!("Detected columns:");
    for field in ["date", "food", "exercise", "weight"] {
        let header = r.columns.get(field).map(String::as_str).unwrap_or("-");
        println!("  {field:<8} -> {header}");
    }
    println!();
    println!(
        "Parsed {} daily rows ({} skipped, {} bad numbers)",
        r.rows_parsed, r.rows_skipped, r.invalid_numbers
    );
    println!(
        "Computed {} week(s); {} existing week(s) loaded",
        r.weeks_computed, r.weeks_existing
    );
    println!();
    println!("Added weeks:   {}", r.added);
    println!("Updated weeks: {}", r.updated);
    println!("Total weeks:   {}", r.total);
}

fn print_estimate(e: &MaintenanceEstimate, unit: &str) {
    println!("Dates:         {}  to  {}  ({} days)", e.first_day, e.last_day, e.n_days);
    println!("Start weight:  {:.1} {unit}", e.start_weight);
    println!("End weight:    {:.1} {unit}", e.end_weight);
    println!("Change:        {:+.1} {unit}", e.delta_weight);
    println!();
    println!("Average net calories (food - exercise): {:.0} kcal/day", e.avg_net);
    println!("Estimated daily gap from weight trend:  {:+.0} kcal/day", e.daily_gap);
    println!("Estimated maintenance:                  {:.0} kcal/day", e.maintenance);
    println!();
    let t = e.targets();
    println!("Targets based on this estimate:");
    println!("  Maintain weight:    ~{:.0} kcal/day net", t.maintain);
    println!("  Lose ~0.5 {unit}/week:  ~{:.0} kcal/day net", t.lose_half);
    println!("  Lose ~1.0 {unit}/week:  ~{:.0} kcal/day net", t.lose_one);
    println!("  Gain ~0.5 {unit}/week:  ~{:.0} kcal/day net", t.gain_half);
}

pub fn print_maintenance_report(r: &MaintenanceReport) {
    println!("--- Maintenance Estimate ---");
    println!(
        "Source: {} ({} rows, {} days used)",
        r.input.display(),
        r.rows_read,
        r.days_used
    );
    print_estimate(&r.estimate, r.unit.label());
}

pub fn print_history(exercise: &str, points: &[HistoryPoint]) {
    println!("--- Estimated 1RM over time: {exercise} ---");
    for p in points {
        let mark = if p.is_pr { "  PR" } else { "" };
        println!("{}  {:>7.1}  (best {:>7.1}){mark}", p.date, p.estimated_1rm, p.running_pr);
    }
}

pub fn print_pr_gaps(stats: &[PrStat]) {
    println!("--- Days since PR (estimated 1RM), top {} ---", stats.len());
    let width = stats
        .iter()
        .map(|s| s.exercise_name.len())
        .max()
        .unwrap_or(8)
        .max(8);
    println!(
        "{:<width$}  {:>8}  {:>7}  {:<10}  {:<10}  {:>5}",
        "exercise", "sessions", "pr_1rm", "pr_date", "last_date", "days"
    );
    for s in stats {
        println!(
            "{:<width$}  {:>8}  {:>7.1}  {:<10}  {:<10}  {:>5}",
            s.exercise_name,
            s.session_count,
            s.pr_value,
            s.pr_date,
            s.last_session_date,
            s.days_since_pr
        );
    }
}

pub fn print_workout_report(r: &WorkoutReport) {
    println!(
        "Using workout file: {} (formula={})",
        r.input.display(),
        r.formula
    );
    println!(
        "Rows read: {}, sets kept: {}, filtered: {}",
        r.rows_read, r.sets_kept, r.sets_filtered
    );
    println!();
    if let Some((name, points)) = &r.history {
        print_history(name, points);
        println!();
    }
    // Feilen rapporteres av kalleren etter historikken
    if r.pr_gaps_error.is_none() {
        print_pr_gaps(&r.pr_gaps);
    }
}
