use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::{DailyRecord, WeeklyAggregate, WeeklyRow};

/// Mandagen på eller før `date` (ISO-ukedag 0 = mandag).
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

#[derive(Debug, Default, Clone, Copy)]
struct Mean {
    sum: f64,
    cnt: usize,
}

impl Mean {
    fn push(&mut self, v: Option<f64>) {
        if let Some(x) = v {
            self.sum += x;
            self.cnt += 1;
        }
    }

    fn get(&self) -> Option<f64> {
        if self.cnt == 0 {
            None
        } else {
            Some(self.sum / self.cnt as f64)
        }
    }
}

#[derive(Debug, Default)]
struct Bucket {
    weight: Mean,
    food: Mean,
    exercise: Mean,
    net: Mean,
}

/// Grupperer dagsrader per uke. Hvert felt snittes bare over dager der det finnes;
/// netto krever både mat og trening samme dag.
pub fn aggregate_weekly(daily: &[DailyRecord]) -> Vec<WeeklyAggregate> {
    let mut buckets: BTreeMap<NaiveDate, Bucket> = BTreeMap::new();

    for d in daily {
        let b = buckets.entry(week_start(d.date)).or_default();
        b.weight.push(d.weight);
        b.food.push(d.food);
        b.exercise.push(d.exercise);
        if let (Some(f), Some(e)) = (d.food, d.exercise) {
            b.net.push(Some(f - e));
        }
    }

    buckets
        .into_iter()
        .map(|(ws, b)| WeeklyAggregate {
            week_start: ws,
            avg_weight: b.weight.get(),
            avg_food: b.food.get(),
            avg_exercise: b.exercise.get(),
            avg_net: b.net.get(),
        })
        .collect()
}

fn fmt_1(x: Option<f64>) -> String {
    x.map(|v| format!("{v:.1}")).unwrap_or_default()
}

fn fmt_0(x: Option<f64>) -> String {
    x.map(|v| format!("{v:.0}")).unwrap_or_default()
}

impl WeeklyAggregate {
    /// Vekt med én desimal, kalorier uten desimaler, tomt når verdien mangler.
    pub fn to_row(&self) -> WeeklyRow {
        WeeklyRow {
            week_start: self.week_start.format("%Y-%m-%d").to_string(),
            avg_weight: fmt_1(self.avg_weight),
            avg_food: fmt_0(self.avg_food),
            avg_exercise: fmt_0(self.avg_exercise),
            avg_net: fmt_0(self.avg_net),
        }
    }
}
