//! The baseline of tracked action items — last period's report rows with
//! the remediation bookkeeping the route owners filled in.

use crate::types::{Cause, RouteName};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One previously tracked (route, cause) issue.
///
/// The gap/shortfall/count/ratio fields are the measurements as they stood
/// when the item was opened; the free-text fields come straight from the
/// improvement-plan sheet and pass through to the report untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionItem {
    pub route: RouteName,
    pub cause: Cause,
    pub report_date: Option<NaiveDate>,
    pub prior_gap: Option<f64>,
    pub prior_shortfall: Option<f64>,
    pub prior_count: Option<f64>,
    pub prior_ratio: Option<f64>,
    /// Tracked problem location. Presence of this field is what separates
    /// "resolved" from "auto-resolved" when an item no longer shows up.
    pub location: Option<String>,
    pub remediation: Option<String>,
    pub owner: Option<String>,
    pub deadline: Option<String>,
    pub remark: Option<String>,
}

impl ActionItem {
    pub fn new(route: &str, cause: Cause) -> Self {
        Self {
            route: route.to_string(),
            cause,
            report_date: None,
            prior_gap: None,
            prior_shortfall: None,
            prior_count: None,
            prior_ratio: None,
            location: None,
            remediation: None,
            owner: None,
            deadline: None,
            remark: None,
        }
    }
}

/// Every route the baseline tracks, regardless of cause. Routes outside
/// this set are new to tracking and take the report's append path.
pub fn baseline_routes(items: &[ActionItem]) -> BTreeSet<RouteName> {
    items.iter().map(|item| item.route.clone()).collect()
}
