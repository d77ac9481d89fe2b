use chrono::NaiveDate;
use delay_report_core::extract::CauseRankExtractor;
use delay_report_core::filter::NoiseFilter;
use delay_report_core::merge::{CombinedCauseRecord, DualMetricMerger};
use delay_report_core::{Cause, MetricKind, ReportConfig, WideRow, WideSnapshot};
use std::collections::BTreeSet;

// ── Helpers ──────────────────────────────────────────────────────────────────

const RATIO_COLS: [&str; 6] = [
    "routing_delay_ratio",
    "depot_handoff_delay_ratio",
    "outbound_delay_ratio",
    "transport_delay_ratio",
    "inbound_delay_ratio",
    "dispatch_sign_delay_ratio",
];

const COUNT_COLS: [&str; 6] = [
    "routing_delay_qty",
    "depot_handoff_delay_qty",
    "outbound_delay_qty",
    "transport_delay_qty",
    "inbound_delay_qty",
    "dispatch_sign_delay_qty",
];

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 25).unwrap()
}

fn all_columns() -> Vec<String> {
    let mut columns = vec!["date".to_string(), "route".to_string()];
    columns.extend(RATIO_COLS.iter().map(|c| c.to_string()));
    columns.extend(COUNT_COLS.iter().map(|c| c.to_string()));
    columns.push("gap_to_first_pct".to_string());
    columns.push("shortfall_qty".to_string());
    columns
}

/// A full wide row: ratio cells in percent, count cells, route figures.
fn wide_row(
    route: &str,
    ratios: [Option<f64>; 6],
    counts: [Option<f64>; 6],
    gap_pct: Option<f64>,
    shortfall: Option<f64>,
) -> WideRow {
    let mut row = WideRow::new(day(), route);
    for (column, value) in RATIO_COLS.iter().zip(ratios) {
        row = row.with_cell(column, value);
    }
    for (column, value) in COUNT_COLS.iter().zip(counts) {
        row = row.with_cell(column, value);
    }
    row.with_cell("gap_to_first_pct", gap_pct)
        .with_cell("shortfall_qty", shortfall)
}

fn merge_snapshot(rows: Vec<WideRow>) -> Vec<CombinedCauseRecord> {
    let config = ReportConfig::default();
    let snapshot = WideSnapshot::new(all_columns(), rows);
    let extractor = CauseRankExtractor::new(&config);
    let ratios = extractor.extract(&snapshot, MetricKind::Ratio).unwrap();
    let counts = extractor.extract(&snapshot, MetricKind::Count).unwrap();
    DualMetricMerger::new(&config)
        .merge(&ratios, &counts, &snapshot)
        .unwrap()
}

fn record(cause: Cause, ratio: f64, count: f64) -> CombinedCauseRecord {
    CombinedCauseRecord {
        date: day(),
        route: "harbor-east".to_string(),
        cause,
        rank: 1,
        ratio,
        count,
        gap_to_first: Some(0.08),
        shortfall: Some(40.0),
    }
}

// ── Merger tests ─────────────────────────────────────────────────────────────

/// Only causes holding the same rank in both views survive the join; a
/// cause that is top-3 in one view but not rank-aligned in the other is
/// dropped. Dispatch-sign survives because both extractions retain it.
#[test]
fn join_requires_rank_agreement_in_both_views() {
    // Ratio order:  routing 9 > depot 8 > outbound 7 > transport 2 > inbound 1
    // Count order:  routing 500 > outbound 300 > transport 250 > depot 4 > inbound 2
    // Only routing holds the same rank (1) in both views. Outbound is
    // top-3 in both but at rank 3 vs rank 2, so it is dropped too.
    let merged = merge_snapshot(vec![wide_row(
        "cross-town",
        [Some(9.0), Some(8.0), Some(7.0), Some(2.0), Some(1.0), Some(0.5)],
        [Some(500.0), Some(4.0), Some(300.0), Some(250.0), Some(2.0), Some(1.0)],
        Some(6.0),
        Some(20.0),
    )]);

    let causes: BTreeSet<Cause> = merged.iter().map(|r| r.cause).collect();
    assert_eq!(
        causes,
        BTreeSet::from([Cause::Routing, Cause::DispatchSign])
    );
}

/// Inner-join closure: the merged cause set never exceeds the
/// intersection of the two retained views.
#[test]
fn merged_causes_subset_of_both_views() {
    let rows = vec![wide_row(
        "cross-town",
        [Some(9.0), Some(8.0), Some(7.0), Some(2.0), Some(1.0), Some(0.5)],
        [Some(500.0), Some(4.0), Some(300.0), Some(250.0), Some(2.0), Some(1.0)],
        Some(6.0),
        Some(20.0),
    )];
    let config = ReportConfig::default();
    let snapshot = WideSnapshot::new(all_columns(), rows.clone());
    let extractor = CauseRankExtractor::new(&config);
    let ratio_causes: BTreeSet<Cause> = extractor
        .extract(&snapshot, MetricKind::Ratio)
        .unwrap()
        .iter()
        .map(|o| o.cause)
        .collect();
    let count_causes: BTreeSet<Cause> = extractor
        .extract(&snapshot, MetricKind::Count)
        .unwrap()
        .iter()
        .map(|o| o.cause)
        .collect();

    let merged_causes: BTreeSet<Cause> =
        merge_snapshot(rows).iter().map(|r| r.cause).collect();

    assert!(merged_causes.is_subset(&ratio_causes));
    assert!(merged_causes.is_subset(&count_causes));
}

/// The merger converts exported percent figures to fractions and attaches
/// the route-level gap/shortfall.
#[test]
fn percent_figures_become_fractions() {
    let merged = merge_snapshot(vec![wide_row(
        "cross-town",
        [Some(9.0), None, None, None, None, None],
        [Some(500.0), None, None, None, None, None],
        Some(6.0),
        Some(20.0),
    )]);

    assert_eq!(merged.len(), 1);
    let routing = &merged[0];
    assert!((routing.ratio - 0.09).abs() < 1e-12);
    assert_eq!(routing.count, 500.0);
    assert!((routing.gap_to_first.unwrap() - 0.06).abs() < 1e-12);
    assert_eq!(routing.shortfall, Some(20.0));
}

/// An undefined route gap stays undefined through the merge; it is never
/// coerced to zero.
#[test]
fn undefined_gap_stays_undefined() {
    let merged = merge_snapshot(vec![wide_row(
        "cross-town",
        [Some(9.0), None, None, None, None, None],
        [Some(500.0), None, None, None, None, None],
        None,
        None,
    )]);

    assert_eq!(merged[0].gap_to_first, None);
    assert_eq!(merged[0].shortfall, None);
}

// ── Noise filter tests ───────────────────────────────────────────────────────

/// Routing with count ≤ 100 is noise even when its ratio clears the
/// generic 5% floor.
#[test]
fn routing_count_floor_beats_good_ratio() {
    let config = ReportConfig::default();
    let kept = NoiseFilter::new(&config.noise).filter(vec![record(Cause::Routing, 0.06, 80.0)]);
    assert!(kept.is_empty());
}

/// Transport with count ≤ 10 is noise.
#[test]
fn transport_count_floor() {
    let config = ReportConfig::default();
    let kept = NoiseFilter::new(&config.noise).filter(vec![
        record(Cause::Transport, 0.07, 10.0),
        record(Cause::Transport, 0.07, 11.0),
    ]);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].count, 11.0);
}

/// The generic floor drops sub-5% ratios for every cause except
/// dispatch-sign.
#[test]
fn ratio_floor_spares_dispatch_sign() {
    let config = ReportConfig::default();
    let kept = NoiseFilter::new(&config.noise).filter(vec![
        record(Cause::DispatchSign, 0.02, 5.0),
        record(Cause::Inbound, 0.02, 5000.0),
    ]);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].cause, Cause::DispatchSign);
}

/// A record violating none of the three rules passes untouched.
#[test]
fn clean_records_pass() {
    let config = ReportConfig::default();
    let input = vec![
        record(Cause::Routing, 0.06, 101.0),
        record(Cause::Outbound, 0.05, 3.0),
    ];
    let kept = NoiseFilter::new(&config.noise).filter(input.clone());
    assert_eq!(kept.len(), input.len());
}
