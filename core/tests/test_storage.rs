// tests/test_storage.rs
use chrono::NaiveDate;
use healthlog_core::storage::{PersistedTable, WEEKLY_HEADERS};
use healthlog_core::{
    load_cfg, load_weekly_table, merge_weekly, save_weekly_table, LogError, WeeklyAggregate,
    WeightUnit,
};
use std::fs;
use tempfile::tempdir;

fn week(s: &str, weight: Option<f64>, food: f64, exercise: f64) -> WeeklyAggregate {
    WeeklyAggregate {
        week_start: NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap(),
        avg_weight: weight,
        avg_food: Some(food),
        avg_exercise: Some(exercise),
        avg_net: Some(food - exercise),
    }
}

#[test]
fn test_missing_destination_is_empty_table() {
    let dir = tempdir().expect("tempdir");
    let table = load_weekly_table(&dir.path().join("weight_history.csv"))
        .expect("manglende fil skal gi tom tabell");
    assert!(table.is_empty());
}

#[test]
fn test_merge_is_idempotent() {
    let weekly = vec![
        week("2025-12-15", Some(180.0), 1900.0, 300.0),
        week("2025-12-22", Some(178.4), 2050.0, 120.0),
    ];

    let mut table = PersistedTable::new();
    let first = merge_weekly(&mut table, &weekly);
    assert_eq!((first.added, first.updated, first.total), (2, 0, 2));

    let snapshot = table.clone();
    let second = merge_weekly(&mut table, &weekly);
    assert_eq!(second.added, 0);
    assert_eq!(second.updated, 0);
    assert_eq!(second.unchanged, 2);
    assert_eq!(table, snapshot);
}

#[test]
fn test_merge_updates_changed_week_and_keeps_others() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("weight_history.csv");

    // eldre uke som ikke finnes i ny input
    fs::write(
        &path,
        "week_start,avg_weight,avg_food,avg_exercise,avg_net\n\
         2025-12-15,181.0,1800,250,1550\n\
         2024-01-01,200.0,2500,100,2400\n",
    )
    .unwrap();

    let mut table = load_weekly_table(&path).expect("kunne ikke laste tabell");
    assert_eq!(table.len(), 2);

    let outcome = merge_weekly(&mut table, &[week("2025-12-15", Some(180.0), 1900.0, 300.0)]);
    assert_eq!((outcome.added, outcome.updated, outcome.total), (0, 1, 2));

    save_weekly_table(&path, &table).expect("kunne ikke lagre tabell");

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], WEEKLY_HEADERS.join(","));
    // sortert på week_start, uberørt uke beholdt ordrett
    assert_eq!(lines[1], "2024-01-01,200.0,2500,100,2400");
    assert_eq!(lines[2], "2025-12-15,180.0,1900,300,1600");
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_save_leaves_no_temp_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("weight_history.csv");

    let mut table = PersistedTable::new();
    merge_weekly(&mut table, &[week("2025-12-22", None, 2000.0, 0.0)]);
    save_weekly_table(&path, &table).expect("save feilet");

    assert!(path.exists());
    let names: Vec<String> = fs::read_dir(path.parent().unwrap())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["weight_history.csv".to_string()]);

    // tom vekt skal leses tilbake som tom streng
    let loaded = load_weekly_table(&path).unwrap();
    assert_eq!(loaded["2025-12-22"].avg_weight, "");
    assert_eq!(loaded["2025-12-22"].avg_net, "2000");
}

#[test]
fn test_destination_without_header_is_fatal() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("weight_history.csv");
    fs::write(&path, "2025-12-15,181.0,1800,250,1550\n").unwrap();

    let err = load_weekly_table(&path).unwrap_err();
    assert!(matches!(err, LogError::MissingHeader { .. }), "{err:?}");
}

#[test]
fn test_cfg_defaults_and_overrides() {
    let dir = tempdir().expect("tempdir");

    // Manglende fil -> default
    let cfg = load_cfg(&dir.path().join("nope.json")).expect("default cfg");
    assert_eq!(cfg.formula, "epley");
    assert_eq!(cfg.min_sessions, 6);
    assert_eq!(cfg.top_n, 20);

    // Delvis fil -> resten default
    let path = dir.path().join("cfg.json");
    fs::write(&path, r#"{ "formula": "brzycki", "top_n": 5 }"#).unwrap();
    let cfg = load_cfg(&path).expect("gyldig cfg");
    assert_eq!(cfg.formula, "brzycki");
    assert_eq!(cfg.top_n, 5);
    assert_eq!(cfg.max_reps, 20);
    assert_eq!(cfg.kcal_per_unit(), 3500.0);

    // enhet fra fila styrer kcal per enhet
    let path = dir.path().join("cfg_kg.json");
    fs::write(&path, r#"{ "unit": "kg" }"#).unwrap();
    let cfg = load_cfg(&path).expect("gyldig cfg");
    assert_eq!(cfg.unit, WeightUnit::Kg);
    assert_eq!(cfg.kcal_per_unit(), 7700.0);
}

#[test]
fn test_cfg_errors_are_reported() {
    let dir = tempdir().expect("tempdir");

    let path = dir.path().join("bad_type.json");
    fs::write(&path, r#"{ "top_n": "mange" }"#).unwrap();
    match load_cfg(&path).unwrap_err() {
        LogError::Config { path, .. } => assert_eq!(path, "top_n"),
        other => panic!("forventet Config-feil, fikk {other:?}"),
    }

    let path = dir.path().join("bad_formula.json");
    fs::write(&path, r#"{ "formula": "lombardi" }"#).unwrap();
    assert!(matches!(load_cfg(&path), Err(LogError::UnknownFormula(_))));
}
