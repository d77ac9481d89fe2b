//! DualMetricMerger — inner join of the ratio and count views.
//!
//! A cause survives only if both views put it in their retained set at the
//! same rank position for the same (date, route). Dispatch-sign always
//! survives because both extractions retain it unconditionally.
//!
//! The merged record is enriched with the route-level gap/shortfall
//! figures, and the exported percent values (ratio, gap) are normalized to
//! fractions here.

use crate::config::ReportConfig;
use crate::error::ReportResult;
use crate::extract::CauseObservation;
use crate::snapshot::WideSnapshot;
use crate::types::{Cause, RouteName};
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct CombinedCauseRecord {
    pub date: NaiveDate,
    pub route: RouteName,
    pub cause: Cause,
    pub rank: u32,
    /// Delay ratio as a fraction (0.06 = 6%).
    pub ratio: f64,
    /// Delayed-parcel count.
    pub count: f64,
    /// Route-level gap to the best route, as a fraction.
    pub gap_to_first: Option<f64>,
    pub shortfall: Option<f64>,
}

pub struct DualMetricMerger<'a> {
    config: &'a ReportConfig,
}

impl<'a> DualMetricMerger<'a> {
    pub fn new(config: &'a ReportConfig) -> Self {
        Self { config }
    }

    pub fn merge(
        &self,
        ratios: &[CauseObservation],
        counts: &[CauseObservation],
        snapshot: &WideSnapshot,
    ) -> ReportResult<Vec<CombinedCauseRecord>> {
        let figures = snapshot.route_figures(self.config)?;

        let count_index: BTreeMap<(NaiveDate, &str, Cause, u32), f64> = counts
            .iter()
            .map(|o| ((o.date, o.route.as_str(), o.cause, o.rank), o.value))
            .collect();

        let mut records = Vec::new();
        for obs in ratios {
            let key = (obs.date, obs.route.as_str(), obs.cause, obs.rank);
            let Some(&count) = count_index.get(&key) else {
                continue;
            };
            let route_figures = figures.get(&obs.route).copied().unwrap_or_default();
            records.push(CombinedCauseRecord {
                date: obs.date,
                route: obs.route.clone(),
                cause: obs.cause,
                rank: obs.rank,
                ratio: obs.value / 100.0,
                count,
                gap_to_first: route_figures.gap_to_first_pct.map(|g| g / 100.0),
                shortfall: route_figures.shortfall,
            });
        }

        log::debug!(
            "merge: {} of {} ratio observations matched the count view",
            records.len(),
            ratios.len()
        );

        Ok(records)
    }
}
