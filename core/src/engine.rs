//! The report engine — wires the six pipeline stages together.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. CauseRankExtractor, once per metric view
//!   2. DualMetricMerger
//!   3. NoiseFilter
//!   4. FollowUpMatcher
//!   5. ChangeClassifier
//!   6. ReportAssembler
//!
//! RULES:
//!   - Data flows strictly forward; no stage feeds an earlier one.
//!   - Every stage is a pure function of its inputs plus the config.
//!   - A run either completes or fails fast on a structural input error;
//!     there is no partial mode.

use crate::baseline::{baseline_routes, ActionItem};
use crate::classify::ChangeClassifier;
use crate::config::ReportConfig;
use crate::error::ReportResult;
use crate::extract::CauseRankExtractor;
use crate::filter::NoiseFilter;
use crate::followup::FollowUpMatcher;
use crate::merge::DualMetricMerger;
use crate::report::{ReconciledRow, ReportAssembler};
use crate::snapshot::WideSnapshot;
use crate::types::MetricKind;

pub struct ReportEngine {
    config: ReportConfig,
}

impl ReportEngine {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// One full reconciliation run over one period's snapshot.
    ///
    /// Re-running with identical inputs yields a row-set-identical report;
    /// row order is matched rows in baseline order, then appended
    /// untracked-route rows in snapshot order.
    pub fn run(
        &self,
        snapshot: &WideSnapshot,
        baseline: &[ActionItem],
    ) -> ReportResult<Vec<ReconciledRow>> {
        log::info!(
            "report run: {} snapshot rows, {} baseline items",
            snapshot.rows().len(),
            baseline.len()
        );

        let extractor = CauseRankExtractor::new(&self.config);
        let ratios = extractor.extract(snapshot, MetricKind::Ratio)?;
        let counts = extractor.extract(snapshot, MetricKind::Count)?;

        let merged = DualMetricMerger::new(&self.config).merge(&ratios, &counts, snapshot)?;
        let filtered = NoiseFilter::new(&self.config.noise).filter(merged);

        let matched = FollowUpMatcher.match_baseline(baseline, &filtered);

        let classifier = ChangeClassifier;
        let classified = matched
            .into_iter()
            .map(|row| {
                let status = classifier.classify(&row);
                (row, status)
            })
            .collect();

        let report = ReportAssembler.assemble(classified, &filtered, &baseline_routes(baseline));

        log::info!("report run complete: {} rows", report.len());

        Ok(report)
    }
}
