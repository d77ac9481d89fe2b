//! Report configuration — column maps and suppression thresholds.
//!
//! Everything here is an explicit immutable value handed to each pipeline
//! stage at construction. The defaults reproduce the thresholds the
//! operations team has been running with; they can be overridden from a
//! JSON file for ad-hoc reruns.

use crate::error::ReportResult;
use crate::types::{Cause, MetricKind};
use serde::{Deserialize, Serialize};

/// One wide-table column and the canonical cause it measures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub column: String,
    pub cause: Cause,
}

impl ColumnSpec {
    fn new(column: &str, cause: Cause) -> Self {
        Self {
            column: column.to_string(),
            cause,
        }
    }
}

/// Suppression thresholds applied by the noise filter.
///
/// The two count floors and the ratio floor are operational constants with
/// no documented derivation; they are kept configurable but their meaning
/// is exactly the historical one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoiseThresholds {
    /// Routing-cause records with count at or below this are noise.
    pub routing_count_floor: f64,
    /// Transport-cause records with count at or below this are noise.
    pub transport_count_floor: f64,
    /// Records with a delay ratio below this fraction are noise,
    /// dispatch-sign excepted.
    pub ratio_floor: f64,
}

impl Default for NoiseThresholds {
    fn default() -> Self {
        Self {
            routing_count_floor: 100.0,
            transport_count_floor: 10.0,
            ratio_floor: 0.05,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Identifier columns of the wide snapshot.
    pub date_column: String,
    pub route_column: String,

    /// Route-level columns carried through to the report.
    pub gap_column: String,
    pub shortfall_column: String,

    /// Explicit raw-column → cause maps, one per metric view. A column not
    /// listed here is never read; a listed column missing from the input is
    /// a schema mismatch.
    pub ratio_columns: Vec<ColumnSpec>,
    pub count_columns: Vec<ColumnSpec>,

    /// Rank cutoff for the per-route top-cause extraction.
    pub top_rank: u32,

    pub noise: NoiseThresholds,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            date_column: "date".to_string(),
            route_column: "route".to_string(),
            gap_column: "gap_to_first_pct".to_string(),
            shortfall_column: "shortfall_qty".to_string(),
            ratio_columns: vec![
                ColumnSpec::new("routing_delay_ratio", Cause::Routing),
                ColumnSpec::new("depot_handoff_delay_ratio", Cause::DepotHandoff),
                ColumnSpec::new("outbound_delay_ratio", Cause::Outbound),
                ColumnSpec::new("transport_delay_ratio", Cause::Transport),
                ColumnSpec::new("inbound_delay_ratio", Cause::Inbound),
                ColumnSpec::new("dispatch_sign_delay_ratio", Cause::DispatchSign),
            ],
            count_columns: vec![
                ColumnSpec::new("routing_delay_qty", Cause::Routing),
                ColumnSpec::new("depot_handoff_delay_qty", Cause::DepotHandoff),
                ColumnSpec::new("outbound_delay_qty", Cause::Outbound),
                ColumnSpec::new("transport_delay_qty", Cause::Transport),
                ColumnSpec::new("inbound_delay_qty", Cause::Inbound),
                ColumnSpec::new("dispatch_sign_delay_qty", Cause::DispatchSign),
            ],
            top_rank: 3,
            noise: NoiseThresholds::default(),
        }
    }
}

impl ReportConfig {
    /// Load a config override from JSON.
    pub fn from_json(json: &str) -> ReportResult<Self> {
        let config = serde_json::from_str(json)?;
        Ok(config)
    }

    /// The cause-column map for one metric view.
    pub fn cause_columns(&self, kind: MetricKind) -> &[ColumnSpec] {
        match kind {
            MetricKind::Ratio => &self.ratio_columns,
            MetricKind::Count => &self.count_columns,
        }
    }
}
