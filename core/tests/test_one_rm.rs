use chrono::NaiveDate;
use healthlog_core::one_rm::load_sets;
use healthlog_core::reader::parse_table;
use healthlog_core::{best_per_day, estimate_1rm, Cfg, OneRmFormula, SetRecord};

fn set(date: &str, name: &str, weight: f64, reps: u32) -> SetRecord {
    SetRecord {
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        exercise_name: name.to_string(),
        weight,
        reps,
    }
}

#[test]
fn single_rep_is_the_weight_itself() {
    assert_eq!(estimate_1rm(225.0, 1, OneRmFormula::Epley), 225.0);
    assert_eq!(estimate_1rm(225.0, 1, OneRmFormula::Brzycki), 225.0);
    assert_eq!(estimate_1rm(225.0, 0, OneRmFormula::Epley), 225.0);
}

#[test]
fn epley_and_brzycki_values() {
    let e = estimate_1rm(100.0, 10, OneRmFormula::Epley);
    assert!((e - 133.333_333).abs() < 1e-3, "epley={e}");

    let b = estimate_1rm(100.0, 10, OneRmFormula::Brzycki);
    assert!((b - 133.333_333).abs() < 1e-3, "brzycki={b}");

    let b5 = estimate_1rm(200.0, 5, OneRmFormula::Brzycki);
    assert!((b5 - 225.0).abs() < 1e-9, "brzycki5={b5}");
}

#[test]
fn brzycki_is_capped_for_very_long_sets() {
    let at_cap = estimate_1rm(50.0, 36, OneRmFormula::Brzycki);
    let past_cap = estimate_1rm(50.0, 40, OneRmFormula::Brzycki);
    assert!(at_cap.is_finite());
    assert_eq!(at_cap, past_cap);
    assert!((at_cap - 1800.0).abs() < 1e-9);
}

#[test]
fn best_per_day_keeps_top_set_only() {
    let sets = vec![
        set("2025-03-01", "Bench Press", 135.0, 10), // 180
        set("2025-03-01", "Bench Press", 185.0, 5),  // 215.83
        set("2025-03-01", "Bench Press", 95.0, 12),  // warmup
        set("2025-03-03", "Bench Press", 190.0, 3),  // 209
        set("2025-03-01", "Squat", 225.0, 5),        // 262.5
    ];
    let best = best_per_day(&sets, OneRmFormula::Epley);

    assert_eq!(best.len(), 3);
    assert_eq!(best[0].exercise_name, "Bench Press");
    assert_eq!(best[0].date.to_string(), "2025-03-01");
    assert!((best[0].estimated_1rm - 185.0 * (1.0 + 5.0 / 30.0)).abs() < 1e-9);
    assert_eq!(best[1].date.to_string(), "2025-03-03");
    assert_eq!(best[2].exercise_name, "Squat");
    assert!((best[2].estimated_1rm - 262.5).abs() < 1e-9);
}

const WORKOUT_TAB: &str = "Date\tWorkout Name\tExercise Name\tSet Order\tWeight\tReps\n\
2025-03-01\tPush\tBench Press\t1\t135\t10\n\
2025-03-01\tPush\tBench Press\t2\t185\t5\n\
2025-03-01\tPush\tBench Press\t3\t45\t25\n\
2025-03-01\tPush\tPlank\t1\t\t\n\
Totals\t\t\t\t\t\n\
2025-03-02\tLegs\t\t1\t225\t5\n\
2025-03-02\tLegs\tSquat\t1\t100\t5\n";

#[test]
fn load_sets_filters_invalid_and_out_of_range_rows() {
    let table = parse_table(WORKOUT_TAB, b'\t').expect("gyldig tab-fil");
    let cfg = Cfg::default();
    let (sets, stats) = load_sets(&table, &cfg).expect("alle kolonner finnes");

    assert_eq!(stats.rows_read, 7);
    assert_eq!(stats.sets_kept, 3);
    // 25 reps > max_reps
    assert_eq!(stats.reps_out_of_range, 1);
    // plank uten vekt, Totals-rad, tomt øvelsesnavn
    assert_eq!(stats.rows_invalid, 3);
    assert_eq!(stats.sets_filtered(), 4);

    assert_eq!(sets[0].exercise_name, "Bench Press");
    assert_eq!(sets[0].reps, 10);
    assert_eq!(sets[2].exercise_name, "Squat");
    assert_eq!(sets[2].weight, 100.0);
}

#[test]
fn kg_files_are_converted_when_asked() {
    let table = parse_table(WORKOUT_TAB, b'\t').unwrap();
    let cfg = Cfg {
        convert_kg_to_lbs: true,
        ..Cfg::default()
    };
    let (sets, _) = load_sets(&table, &cfg).unwrap();
    let squat = sets.iter().find(|s| s.exercise_name == "Squat").unwrap();
    assert!((squat.weight - 220.46226218).abs() < 1e-6);
}

#[test]
fn workout_file_without_reps_column_is_fatal() {
    let table = parse_table("Date,Exercise Name,Weight\n2025-03-01,Squat,100\n", b',').unwrap();
    assert!(load_sets(&table, &Cfg::default()).is_err());
}
