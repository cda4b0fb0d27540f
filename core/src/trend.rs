use std::collections::BTreeMap;

use log::info;

use crate::error::{LogError, Result};
use crate::models::{DailyBestRecord, HistoryPoint, PrStat};
use crate::types::Cfg;

const PR_EPS: f64 = 1e-9;

/// Løpende PR for én øvelse. Verdien synker aldri; datoen er første dag
/// toppverdien ble nådd.
#[derive(Debug, Clone, Copy)]
struct RunningPr {
    value: f64,
    date: chrono::NaiveDate,
}

impl RunningPr {
    fn update(state: Option<Self>, rec: &DailyBestRecord) -> Self {
        match state {
            Some(pr) if rec.estimated_1rm <= pr.value => pr,
            _ => RunningPr {
                value: rec.estimated_1rm,
                date: rec.date,
            },
        }
    }
}

/// Øvelser rangert etter flest dager siden PR (for å finne løft som har stoppet opp).
///
/// Øvelser med færre enn `cfg.min_sessions` økter tas ikke med. Like mange
/// dager beholder alfabetisk rekkefølge.
pub fn pr_gaps(daily: &[DailyBestRecord], cfg: &Cfg) -> Result<Vec<PrStat>> {
    let mut by_exercise: BTreeMap<&str, Vec<&DailyBestRecord>> = BTreeMap::new();
    for rec in daily {
        by_exercise
            .entry(rec.exercise_name.as_str())
            .or_default()
            .push(rec);
    }

    let mut stats = Vec::new();
    for (name, mut sessions) in by_exercise {
        if sessions.len() < cfg.min_sessions {
            continue;
        }
        sessions.sort_by_key(|r| r.date);

        let mut pr: Option<RunningPr> = None;
        for rec in &sessions {
            pr = Some(RunningPr::update(pr, rec));
        }
        let (Some(pr), Some(last)) = (pr, sessions.last()) else {
            continue;
        };

        stats.push(PrStat {
            exercise_name: name.to_string(),
            session_count: sessions.len(),
            pr_value: pr.value,
            pr_date: pr.date,
            last_session_date: last.date,
            days_since_pr: (last.date - pr.date).num_days(),
        });
    }

    if stats.is_empty() {
        return Err(LogError::NotEnoughSessions {
            min_sessions: cfg.min_sessions,
        });
    }

    stats.sort_by(|a, b| b.days_since_pr.cmp(&a.days_since_pr));
    stats.truncate(cfg.top_n);
    info!("PR-statistikk for {} øvelser", stats.len());
    Ok(stats)
}

/// Historikk for én øvelse (navn sammenlignes uten hensyn til store/små bokstaver).
pub fn exercise_history(
    daily: &[DailyBestRecord],
    exercise: &str,
    cfg: &Cfg,
) -> Result<Vec<HistoryPoint>> {
    let wanted = exercise.trim().to_lowercase();
    let mut sessions: Vec<&DailyBestRecord> = daily
        .iter()
        .filter(|r| r.exercise_name.to_lowercase() == wanted)
        .collect();

    if sessions.is_empty() {
        return Err(LogError::ExerciseNotFound {
            name: exercise.to_string(),
            suggestions: suggest_names(daily, &wanted, cfg.suggestion_limit),
        });
    }
    sessions.sort_by_key(|r| r.date);

    let mut running = f64::NEG_INFINITY;
    Ok(sessions
        .into_iter()
        .map(|r| {
            running = running.max(r.estimated_1rm);
            HistoryPoint {
                date: r.date,
                estimated_1rm: r.estimated_1rm,
                running_pr: running,
                is_pr: r.estimated_1rm >= running - PR_EPS,
            }
        })
        .collect())
}

/// Navn som ligner på søket; ellers et utvalg av alle navn i fila.
fn suggest_names(daily: &[DailyBestRecord], wanted: &str, limit: usize) -> Vec<String> {
    let mut names: Vec<&str> = Vec::new();
    for rec in daily {
        if !names.contains(&rec.exercise_name.as_str()) {
            names.push(rec.exercise_name.as_str());
        }
    }

    let close: Vec<&str> = names
        .iter()
        .copied()
        .filter(|n| {
            let lower = n.to_lowercase();
            !wanted.is_empty() && (lower.contains(wanted) || wanted.contains(lower.as_str()))
        })
        .collect();

    let pool = if close.is_empty() { names } else { close };
    pool.into_iter().take(limit).map(str::to_string).collect()
}
