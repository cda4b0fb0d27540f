// tests/test_daily.rs
use healthlog_core::daily::build_daily_records;
use healthlog_core::reader::parse_table;
use healthlog_core::schema::{DAILY_LOG_ALIASES, DAILY_LOG_REQUIRED};
use healthlog_core::{resolve_columns, DailyRecord};

fn build(text: &str) -> (Vec<DailyRecord>, healthlog_core::daily::BuildStats) {
    let table = parse_table(text, b',').expect("gyldig csv");
    let cols = resolve_columns(&table.headers, DAILY_LOG_ALIASES, DAILY_LOG_REQUIRED)
        .expect("Date finnes");
    build_daily_records(&table, &cols)
}

#[test]
fn test_bad_number_keeps_row_and_is_counted() {
    let (records, stats) = build(
        "Date,Food,Exer.,Weight\n\
         2025-12-15,2000,200,abc\n\
         2025-12-16,lots,100,180.2\n",
    );

    // radene beholdes, bare feltet blir ukjent
    assert_eq!(records.len(), 2);
    assert_eq!(stats.rows_parsed, 2);
    assert_eq!(stats.rows_skipped(), 0);
    assert_eq!(stats.invalid_numbers, 2);

    assert_eq!(records[0].weight, None);
    assert_eq!(records[0].food, Some(2000.0));
    assert_eq!(records[0].exercise, Some(200.0));

    assert_eq!(records[1].food, None);
    assert_eq!(records[1].weight, Some(180.2));
}

#[test]
fn test_short_row_leaves_fields_unknown() {
    // raden slutter etter datoen: mat, trening og vekt mangler helt
    let (records, stats) = build("Date,Food,Exer.,Weight\n2025-12-15\n2025-12-16,1800\n");

    assert_eq!(records.len(), 2);
    assert_eq!(stats.invalid_numbers, 0);
    assert_eq!(records[0].food, None);
    assert_eq!(records[0].exercise, None);
    assert_eq!(records[0].weight, None);
    assert_eq!(records[1].food, Some(1800.0));
    assert_eq!(records[1].exercise, None);
}

#[test]
fn test_dash_is_zero_only_for_exercise() {
    let (records, stats) = build("Date,Food,Exer.,Weight\n2025-12-15,-,-,-\n");

    assert_eq!(stats.invalid_numbers, 0);
    let r = &records[0];
    // ingen trening = 0 kcal forbrent
    assert_eq!(r.exercise, Some(0.0));
    // strek i mat eller vekt er ikke en måling
    assert_eq!(r.food, None);
    assert_eq!(r.weight, None);
}

#[test]
fn test_dashed_food_does_not_drag_weekly_mean() {
    let (records, _) = build(
        "Date,Food,Exer.\n\
         2025-12-15,2000,0\n\
         2025-12-16,-,0\n",
    );
    let weeks = healthlog_core::aggregate_weekly(&records);
    assert_eq!(weeks[0].avg_food, Some(2000.0));
    assert_eq!(weeks[0].avg_net, Some(2000.0));
}

#[test]
fn test_rows_without_usable_date_are_skipped() {
    let (records, stats) = build(
        "Date,Food\n\
         ,2000\n\
         Totals,4000\n\
         2025-12-15,2000\n",
    );
    assert_eq!(records.len(), 1);
    assert_eq!(stats.rows_read, 3);
    assert_eq!(stats.skipped_blank_date, 1);
    assert_eq!(stats.skipped_bad_date, 1);
}
