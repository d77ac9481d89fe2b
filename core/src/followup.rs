//! FollowUpMatcher — reconcile the current period against the baseline.
//!
//! Builds a review view of the filtered records keyed by (route, cause) —
//! rank is extraction-internal and the snapshot date is not a stable key
//! across periods, so both are dropped — then left-joins the baseline
//! against it. An unmatched action item keeps every reviewed field absent;
//! that absence is meaningful downstream and must not be zero-filled.

use crate::baseline::ActionItem;
use crate::merge::CombinedCauseRecord;
use crate::types::{Cause, RouteName};
use std::collections::BTreeMap;

/// Current-period re-measurement of a tracked issue.
#[derive(Debug, Clone, Copy)]
pub struct ReviewedFigures {
    pub gap: Option<f64>,
    pub shortfall: Option<f64>,
    pub count: f64,
    pub ratio: f64,
}

#[derive(Debug, Clone)]
pub struct MatchedRow {
    pub item: ActionItem,
    pub reviewed: Option<ReviewedFigures>,
    /// reviewed gap minus prior gap. Defined only when both are present;
    /// absent is not zero.
    pub delta: Option<f64>,
}

pub struct FollowUpMatcher;

impl FollowUpMatcher {
    pub fn match_baseline(
        &self,
        baseline: &[ActionItem],
        current: &[CombinedCauseRecord],
    ) -> Vec<MatchedRow> {
        let mut review: BTreeMap<(RouteName, Cause), Vec<ReviewedFigures>> = BTreeMap::new();
        for record in current {
            review
                .entry((record.route.clone(), record.cause))
                .or_default()
                .push(ReviewedFigures {
                    gap: record.gap_to_first,
                    shortfall: record.shortfall,
                    count: record.count,
                    ratio: record.ratio,
                });
        }

        // Left join, fanning out when one item matches several records.
        let mut rows = Vec::new();
        for item in baseline {
            let key = (item.route.clone(), item.cause);
            match review.get(&key) {
                Some(figures) => {
                    for reviewed in figures {
                        rows.push(MatchedRow {
                            item: item.clone(),
                            reviewed: Some(*reviewed),
                            delta: delta(reviewed.gap, item.prior_gap),
                        });
                    }
                }
                None => rows.push(MatchedRow {
                    item: item.clone(),
                    reviewed: None,
                    delta: None,
                }),
            }
        }

        log::debug!(
            "follow-up: {} baseline items produced {} matched rows",
            baseline.len(),
            rows.len()
        );

        rows
    }
}

fn delta(reviewed_gap: Option<f64>, prior_gap: Option<f64>) -> Option<f64> {
    match (reviewed_gap, prior_gap) {
        (Some(reviewed), Some(prior)) => Some(reviewed - prior),
        _ => None,
    }
}
