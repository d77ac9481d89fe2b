//! ReportAssembler — final report rows in the fixed column order.
//!
//! Two sources, concatenated:
//!   (a) the classified follow-up rows, one per baseline action item
//!       (fanned out where a key matched twice), and
//!   (b) current-period records for routes the baseline does not track at
//!       all. These have no history to reconcile against: their current
//!       measurements land in the un-suffixed columns and every reviewed
//!       and baseline-only field stays absent.
//!
//! Downstream consumers read the report positionally — the column order in
//! `REPORT_COLUMNS` (and the field order of `ReconciledRow`) must not
//! change. Rank is extraction-internal and never appears here.

use crate::classify::ChangeStatus;
use crate::followup::MatchedRow;
use crate::merge::CombinedCauseRecord;
use crate::types::{Cause, RouteName};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Report header, in output order. Matches `ReconciledRow` field order.
pub const REPORT_COLUMNS: [&str; 18] = [
    "reviewed_date",
    "route",
    "prior_gap",
    "prior_shortfall",
    "cause",
    "count",
    "ratio",
    "status",
    "reviewed_gap",
    "delta",
    "reviewed_shortfall",
    "reviewed_count",
    "reviewed_ratio",
    "location",
    "remediation",
    "owner",
    "deadline",
    "remark",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciledRow {
    pub reviewed_date: Option<NaiveDate>,
    pub route: RouteName,
    pub prior_gap: Option<f64>,
    pub prior_shortfall: Option<f64>,
    pub cause: Cause,
    pub count: Option<f64>,
    pub ratio: Option<f64>,
    pub status: Option<ChangeStatus>,
    pub reviewed_gap: Option<f64>,
    pub delta: Option<f64>,
    pub reviewed_shortfall: Option<f64>,
    pub reviewed_count: Option<f64>,
    pub reviewed_ratio: Option<f64>,
    pub location: Option<String>,
    pub remediation: Option<String>,
    pub owner: Option<String>,
    pub deadline: Option<String>,
    pub remark: Option<String>,
}

impl ReconciledRow {
    fn from_matched(row: MatchedRow, status: ChangeStatus) -> Self {
        let MatchedRow {
            item,
            reviewed,
            delta,
        } = row;
        Self {
            reviewed_date: item.report_date,
            route: item.route,
            prior_gap: item.prior_gap,
            prior_shortfall: item.prior_shortfall,
            cause: item.cause,
            count: item.prior_count,
            ratio: item.prior_ratio,
            status: Some(status),
            reviewed_gap: reviewed.and_then(|r| r.gap),
            delta,
            reviewed_shortfall: reviewed.and_then(|r| r.shortfall),
            reviewed_count: reviewed.map(|r| r.count),
            reviewed_ratio: reviewed.map(|r| r.ratio),
            location: item.location,
            remediation: item.remediation,
            owner: item.owner,
            deadline: item.deadline,
            remark: item.remark,
        }
    }

    fn from_untracked(record: &CombinedCauseRecord) -> Self {
        Self {
            reviewed_date: Some(record.date),
            route: record.route.clone(),
            prior_gap: record.gap_to_first,
            prior_shortfall: record.shortfall,
            cause: record.cause,
            count: Some(record.count),
            ratio: Some(record.ratio),
            status: None,
            reviewed_gap: None,
            delta: None,
            reviewed_shortfall: None,
            reviewed_count: None,
            reviewed_ratio: None,
            location: None,
            remediation: None,
            owner: None,
            deadline: None,
            remark: None,
        }
    }
}

pub struct ReportAssembler;

impl ReportAssembler {
    /// `baseline_routes` is the full set of routes the baseline tracks; a
    /// current record is appended only when its route is absent from it
    /// entirely, not merely when the (route, cause) pair is new.
    pub fn assemble(
        &self,
        classified: Vec<(MatchedRow, ChangeStatus)>,
        current: &[CombinedCauseRecord],
        baseline_routes: &BTreeSet<RouteName>,
    ) -> Vec<ReconciledRow> {
        let mut report: Vec<ReconciledRow> = classified
            .into_iter()
            .map(|(row, status)| ReconciledRow::from_matched(row, status))
            .collect();

        let matched = report.len();
        for record in current {
            if !baseline_routes.contains(&record.route) {
                report.push(ReconciledRow::from_untracked(record));
            }
        }

        log::debug!(
            "assemble: {matched} reconciled rows, {} untracked-route rows appended",
            report.len() - matched
        );

        report
    }
}
