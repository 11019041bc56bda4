use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde_json::Value;
use std::path::PathBuf;

use treatment_analytics::config::{AnalyticsConfig, ParsePolicy};
use treatment_analytics::error::{AnalyticsError, TimeField};
use treatment_analytics::models::PatientRecord;
use treatment_analytics::parsing::parse_patients_json;
use treatment_analytics::services::compute_dashboard;
use treatment_analytics::time::ClockTime;
use treatment_analytics::transformations::{filter_by_month_and_window, RosterFilter};

#[derive(Parser, Debug)]
#[command(name = "treatment-report")]
#[command(version)]
#[command(about = "Treatment duration statistics for exported patient records", long_about = None)]
struct Cli {
    /// JSON file holding an array of patient records
    #[arg(value_name = "PATIENTS_JSON")]
    patients: PathBuf,

    /// Analytics configuration (defaults to the first analytics.toml found)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Treat malformed times and dates as NaN / no month instead of failing
    #[arg(long)]
    lenient: bool,

    /// Zero-based month for the time-window filter (0 = January)
    #[arg(long, value_name = "MONTH", requires = "from")]
    month: Option<u32>,

    /// Earliest accepted start time, HH:MM
    #[arg(long, value_name = "HH:MM", requires = "to")]
    from: Option<String>,

    /// Latest accepted end time, HH:MM
    #[arg(long, value_name = "HH:MM", requires = "month")]
    to: Option<String>,

    /// Restrict the dashboard to a one-based roster month (1 = January)
    #[arg(long, value_name = "MONTH", conflicts_with = "month")]
    roster_month: Option<u32>,

    /// Case-insensitive patient name search
    #[arg(long, default_value = "")]
    search: String,

    /// Exact patient gender
    #[arg(long, default_value = "")]
    gender: String,

    /// Provider name substring
    #[arg(long, default_value = "")]
    provider: String,
}

fn load_config(cli: &Cli) -> Result<AnalyticsConfig> {
    let config = match &cli.config {
        Some(path) => AnalyticsConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => AnalyticsConfig::from_default_location().unwrap_or_else(|e| {
            info!("{}; using defaults", e);
            AnalyticsConfig::default()
        }),
    };

    if cli.lenient {
        Ok(config.with_parse_policy(ParsePolicy::Lenient))
    } else {
        Ok(config)
    }
}

/// Point at `--lenient` when a record, not the query, is at fault.
fn explain(err: AnalyticsError) -> anyhow::Error {
    if err.is_record_error() {
        anyhow::Error::new(err).context("Malformed patient record (rerun with --lenient to skip it)")
    } else {
        err.into()
    }
}

/// Dashboard for the roster selection, or the selected visits that fall in
/// the `--month/--from/--to` window. The roster flags narrow the records in
/// both cases.
fn report(cli: &Cli, records: &[PatientRecord], config: &AnalyticsConfig) -> Result<Value> {
    let roster = RosterFilter {
        month: cli.roster_month,
        search: cli.search.clone(),
        gender: cli.gender.clone(),
        provider: cli.provider.clone(),
    };
    let selected = roster.apply(records, config).map_err(explain)?;

    if let (Some(month), Some(from), Some(to)) = (cli.month, &cli.from, &cli.to) {
        let window_start = ClockTime::parse(from, TimeField::WindowStart)?;
        let window_end = ClockTime::parse(to, TimeField::WindowEnd)?;
        let kept = filter_by_month_and_window(&selected, month, window_start, window_end, config)
            .map_err(explain)?;
        Ok(serde_json::to_value(kept)?)
    } else {
        let summary = compute_dashboard(&selected, config).map_err(explain)?;
        Ok(serde_json::to_value(summary)?)
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let records = parse_patients_json(&cli.patients)?;
    info!("Loaded {} records from {}", records.len(), cli.patients.display());

    let output = report(&cli, &records, &config)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    run(Cli::parse())
}
