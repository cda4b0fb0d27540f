use healthlog_core::metrics::Metrics;
use healthlog_core::pipeline::run_weekly_update;
use std::fs;
use tempfile::tempdir;

#[test]
fn smoke_counters_after_weekly_run() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("sample_calories.csv");
    fs::write(&input, "Date,Food,Exer.,Weight\n2025-12-15,2000,-,180\nbad,1,1,1\n").unwrap();

    let m = Metrics::new().unwrap();
    run_weekly_update(&input, &dir.path().join("weight_history.csv"), &m).unwrap();

    let text = m.render().unwrap();
    assert!(text.contains("healthlog_rows_read_total 2"), "{text}");
    assert!(text.contains("healthlog_rows_skipped_total 1"));
    assert!(text.contains("healthlog_weeks_added_total 1"));

    // to instanser deler ikke tellere
    let other = Metrics::new().unwrap();
    assert_eq!(other.rows_read.get(), 0);
}
