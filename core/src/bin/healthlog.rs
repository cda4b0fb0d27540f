use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;

use healthlog_core::cli::{
    print_maintenance_report, print_weekly_report, print_workout_report,
};
use healthlog_core::loseit::find_latest_export;
use healthlog_core::metrics::Metrics;
use healthlog_core::pipeline::{
    run_maintenance, run_weekly_export, run_weekly_update, run_workout_analysis,
};
use healthlog_core::storage::load_cfg;
use healthlog_core::{Cfg, WeightUnit};

#[derive(Parser)]
#[command(name = "healthlog")]
#[command(
    version,
    about = "Ukessnitt, vedlikeholdskalorier og 1RM/PR-statistikk fra eksporterte logger"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON-konfigurasjon (formel, min_sessions, top_n, ...)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Mer logging (-v = debug, -vv = trace)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Skriv prometheus-tellere etter kjøringen
    #[arg(long)]
    metrics: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Oppdater ukestabellen fra en dagslogg
    Weekly {
        #[arg(long, short, default_value = "sample_calories.csv")]
        input: PathBuf,
        #[arg(long, short, default_value = "weight_history.csv")]
        output: PathBuf,
    },

    /// Vedlikeholdsestimat fra dagsloggen
    Maintenance {
        #[arg(long, short, default_value = "Data/daily_log.csv")]
        input: PathBuf,
        /// lbs (3500 kcal/enhet) eller kg (7700 kcal/enhet)
        #[arg(long, value_enum)]
        unit: Option<WeightUnit>,
    },

    /// Vedlikeholdsestimat fra ukeseksportens Daily Summary
    Export {
        /// Eksportfil; uten denne brukes nyeste .csv i --data-dir
        #[arg(long, short)]
        input: Option<PathBuf>,
        #[arg(long, default_value = "Data")]
        data_dir: PathBuf,
        #[arg(long)]
        start_weight: f64,
        #[arg(long)]
        end_weight: f64,
        /// lbs (3500 kcal/enhet) eller kg (7700 kcal/enhet)
        #[arg(long, value_enum)]
        unit: Option<WeightUnit>,
    },

    /// 1RM-historikk og dager siden PR fra treningseksporten
    Workouts {
        #[arg(long, short, default_value = "workouts_log_(2025).tab")]
        input: PathBuf,
        /// Vis historikk for én øvelse
        #[arg(long, short)]
        exercise: Option<String>,
        /// epley eller brzycki
        #[arg(long)]
        formula: Option<String>,
        #[arg(long)]
        top_n: Option<usize>,
        #[arg(long)]
        min_sessions: Option<usize>,
        /// Vektene i fila er kg; regn om til lbs
        #[arg(long)]
        kg_to_lbs: bool,
        /// Skriv resultatet som JSON (for graf-tegning)
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_default_env();
    builder.init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut cfg = match &cli.config {
        Some(path) => {
            load_cfg(path).with_context(|| format!("kunne ikke laste {}", path.display()))?
        }
        None => Cfg::default(),
    };
    let metrics = Metrics::new().context("kunne ikke registrere tellere")?;

    match cli.command {
        Commands::Weekly { input, output } => {
            let report = run_weekly_update(&input, &output, &metrics)
                .with_context(|| format!("ukesoppdatering feilet for {}", input.display()))?;
            print_weekly_report(&report);
        }

        Commands::Maintenance { input, unit } => {
            if let Some(u) = unit {
                cfg.unit = u;
            }
            let report = run_maintenance(&input, &cfg, &metrics)
                .with_context(|| format!("vedlikeholdsestimat feilet for {}", input.display()))?;
            print_maintenance_report(&report);
        }

        Commands::Export {
            input,
            data_dir,
            start_weight,
            end_weight,
            unit,
        } => {
            let input = match input {
                Some(p) => p,
                None => match find_latest_export(&data_dir)? {
                    Some(p) => p,
                    None => bail!("fant ingen ukeseksport (.csv) i {}", data_dir.display()),
                },
            };
            if let Some(u) = unit {
                cfg.unit = u;
            }
            println!("Using CSV file: {}", input.display());
            let report = run_weekly_export(&input, start_weight, end_weight, &cfg)
                .with_context(|| {
                    format!("fant ingen brukbar Daily Summary i {}", input.display())
                })?;
            print_maintenance_report(&report);
        }

        Commands::Workouts {
            input,
            exercise,
            formula,
            top_n,
            min_sessions,
            kg_to_lbs,
            json,
        } => {
            if let Some(f) = formula {
                cfg.formula = f;
            }
            if let Some(n) = top_n {
                cfg.top_n = n;
            }
            if let Some(n) = min_sessions {
                cfg.min_sessions = n;
            }
            cfg.convert_kg_to_lbs |= kg_to_lbs;

            let report = run_workout_analysis(&input, exercise.as_deref(), &cfg, &metrics)
                .with_context(|| format!("treningsanalyse feilet for {}", input.display()))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_workout_report(&report);
            }
            if let Some(msg) = &report.pr_gaps_error {
                bail!("{msg}");
            }
        }
    }

    if cli.metrics {
        print!("{}", metrics.render().context("kunne ikke serialisere tellere")?);
    }
    Ok(())
}
