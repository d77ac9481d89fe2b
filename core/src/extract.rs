//! CauseRankExtractor — wide metric table to ranked long form.
//!
//! This stage:
//!   1. Schema-checks every mapped cause column for the requested view
//!   2. Melts the wide rows into (date, route, cause, value) observations
//!   3. Ranks causes per route, descending by value, competition ranking
//!   4. Keeps rank ≤ top_rank, plus dispatch-sign unconditionally
//!
//! Undefined cells produce no observation at all: a route whose
//! dispatch-sign cell is null gets no dispatch-sign row either.

use crate::config::ReportConfig;
use crate::error::ReportResult;
use crate::snapshot::WideSnapshot;
use crate::types::{Cause, MetricKind, RouteName};
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct CauseObservation {
    pub date: NaiveDate,
    pub route: RouteName,
    pub cause: Cause,
    pub value: f64,
    /// Competition rank within the route: ties share the lowest rank in
    /// the tied block, the next distinct value ranks at (items above + 1).
    pub rank: u32,
}

pub struct CauseRankExtractor<'a> {
    config: &'a ReportConfig,
}

impl<'a> CauseRankExtractor<'a> {
    pub fn new(config: &'a ReportConfig) -> Self {
        Self { config }
    }

    pub fn extract(
        &self,
        snapshot: &WideSnapshot,
        kind: MetricKind,
    ) -> ReportResult<Vec<CauseObservation>> {
        let specs = self.config.cause_columns(kind);
        for spec in specs {
            snapshot.require_column(&spec.column)?;
        }

        // Melt. Null and non-finite cells are dropped before ranking so
        // they can never occupy a rank slot.
        let mut by_route: BTreeMap<RouteName, Vec<(NaiveDate, Cause, f64)>> = BTreeMap::new();
        for row in snapshot.rows() {
            for spec in specs {
                if let Some(value) = row.cell(&spec.column).filter(|v| v.is_finite()) {
                    by_route
                        .entry(row.route.clone())
                        .or_default()
                        .push((row.date, spec.cause, value));
                }
            }
        }

        let mut observations = Vec::new();
        for (route, mut group) in by_route {
            // Value descending; cause order breaks ties so output order is
            // independent of input row order. Rank itself only depends on
            // the value.
            group.sort_by(|a, b| b.2.total_cmp(&a.2).then(a.1.cmp(&b.1)));

            let mut rank = 0u32;
            let mut prev_value = f64::INFINITY;
            for (position, (date, cause, value)) in group.into_iter().enumerate() {
                if value != prev_value {
                    rank = position as u32 + 1;
                    prev_value = value;
                }
                if rank <= self.config.top_rank || cause == Cause::DispatchSign {
                    observations.push(CauseObservation {
                        date,
                        route: route.clone(),
                        cause,
                        value,
                        rank,
                    });
                }
            }
        }

        log::debug!(
            "extract[{kind}]: {} observations across {} routes",
            observations.len(),
            observations
                .iter()
                .map(|o| o.route.as_str())
                .collect::<std::collections::BTreeSet<_>>()
                .len()
        );

        Ok(observations)
    }
}
