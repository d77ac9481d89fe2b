//! report-runner: load one period's exported CSV tables, run the
//! reconciliation pipeline, write the report CSV.
//!
//! Usage:
//!   report-runner --snapshot route_metrics.csv --baseline action_items.csv
//!   report-runner --snapshot s.csv --baseline b.csv --out report.csv --config cfg.json

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use delay_report_core::{
    ActionItem, Cause, ReportConfig, ReportEngine, WideRow, WideSnapshot,
};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct BaselineRecord {
    route: String,
    cause: Cause,
    report_date: Option<NaiveDate>,
    prior_gap: Option<f64>,
    prior_shortfall: Option<f64>,
    prior_count: Option<f64>,
    prior_ratio: Option<f64>,
    location: Option<String>,
    remediation: Option<String>,
    owner: Option<String>,
    deadline: Option<String>,
    remark: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let Some(snapshot_path) = flag_value(&args, "--snapshot") else {
        bail!("--snapshot <csv> is required");
    };
    let Some(baseline_path) = flag_value(&args, "--baseline") else {
        bail!("--baseline <csv> is required");
    };
    let out_path = flag_value(&args, "--out").unwrap_or("report.csv");

    let config = match flag_value(&args, "--config") {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading config {path}"))?;
            ReportConfig::from_json(&json)?
        }
        None => ReportConfig::default(),
    };

    let snapshot = load_snapshot(Path::new(snapshot_path), &config)?;
    let baseline = load_baseline(Path::new(baseline_path))?;

    let report = ReportEngine::new(config).run(&snapshot, &baseline)?;

    let mut writer = csv::Writer::from_path(out_path)
        .with_context(|| format!("creating {out_path}"))?;
    for row in &report {
        writer.serialize(row)?;
    }
    writer.flush()?;

    println!("report-runner");
    println!("  snapshot:  {} rows", snapshot.rows().len());
    println!("  baseline:  {} items", baseline.len());
    println!("  report:    {} rows -> {out_path}", report.len());

    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// Wide snapshot CSV: header row names the columns; the date and route
/// identifier columns are parsed, every other cell becomes Option<f64>
/// with blanks and non-numeric text kept as undefined.
fn load_snapshot(path: &Path, config: &ReportConfig) -> Result<WideSnapshot> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let date_idx = column_index(&headers, &config.date_column, path)?;
    let route_idx = column_index(&headers, &config.route_column, path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let date: NaiveDate = record
            .get(date_idx)
            .unwrap_or_default()
            .parse()
            .with_context(|| format!("bad date in {}", path.display()))?;
        let route = record.get(route_idx).unwrap_or_default();

        let mut row = WideRow::new(date, route);
        for (idx, header) in headers.iter().enumerate() {
            if idx == date_idx || idx == route_idx {
                continue;
            }
            let value = record.get(idx).and_then(|cell| cell.trim().parse::<f64>().ok());
            row = row.with_cell(header, value);
        }
        rows.push(row);
    }

    log::info!("loaded {} snapshot rows from {}", rows.len(), path.display());
    Ok(WideSnapshot::new(headers, rows))
}

fn load_baseline(path: &Path) -> Result<Vec<ActionItem>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("reading baseline {}", path.display()))?;

    let mut items = Vec::new();
    for record in reader.deserialize() {
        let record: BaselineRecord = record?;
        items.push(ActionItem {
            route: record.route,
            cause: record.cause,
            report_date: record.report_date,
            prior_gap: record.prior_gap,
            prior_shortfall: record.prior_shortfall,
            prior_count: record.prior_count,
            prior_ratio: record.prior_ratio,
            location: none_if_blank(record.location),
            remediation: none_if_blank(record.remediation),
            owner: none_if_blank(record.owner),
            deadline: none_if_blank(record.deadline),
            remark: none_if_blank(record.remark),
        });
    }

    log::info!("loaded {} baseline items from {}", items.len(), path.display());
    Ok(items)
}

/// Spreadsheet exports routinely ship whitespace-only cells; those must
/// not count as a tracked location when classifying.
fn none_if_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn column_index(headers: &[String], name: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .with_context(|| format!("column '{name}' missing from {}", path.display()))
}
