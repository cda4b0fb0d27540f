//! HealthLog core: dagslogger, ukeseksporter og treningslogger inn,
//! ukessnitt, 1RM-estimater og PR-statistikk ut.
//!
//! Stegene, fra bunnen: `reader` -> `schema` -> `normalize` -> `daily`
//! -> `weekly` -> `storage`. `one_rm` og `trend` jobber på treningssett,
//! `maintenance` og `loseit` på kalori-/vektdata. `pipeline` kobler alt sammen.

pub mod cli;
pub mod daily;
pub mod error;
pub mod loseit;
pub mod maintenance;
pub mod metrics;
pub mod models;
pub mod normalize;
pub mod one_rm;
pub mod pipeline;
pub mod reader;
pub mod schema;
pub mod storage;
pub mod trend;
pub mod types;
pub mod weekly;

pub use error::{LogError, Result};
pub use models::{
    DailyBestRecord, DailyRecord, HistoryPoint, PrStat, SetRecord, SummaryRow, WeeklyAggregate,
    WeeklyRow,
};
pub use normalize::{parse_date, parse_number, parse_optional, CellKind, NumberCell};
pub use one_rm::{best_per_day, estimate_1rm, OneRmFormula};
pub use schema::{normalize_header, resolve_columns, ColumnMap, Field};
pub use storage::{load_cfg, load_weekly_table, merge_weekly, save_weekly_table, MergeOutcome};
pub use trend::{exercise_history, pr_gaps};
pub use types::{Cfg, WeightUnit};
pub use weekly::{aggregate_weekly, week_start};
