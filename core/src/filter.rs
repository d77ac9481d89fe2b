//! NoiseFilter — domain suppression thresholds.
//!
//! Two cause-specific count floors run first, then the generic ratio floor
//! runs on the survivors. The rules compose as a union of exclusions: a
//! record matching any one of them is dropped. Dispatch-sign is exempt
//! from the ratio floor (and its own cause never matches the count rules).

use crate::config::NoiseThresholds;
use crate::merge::CombinedCauseRecord;
use crate::types::Cause;

pub struct NoiseFilter<'a> {
    thresholds: &'a NoiseThresholds,
}

impl<'a> NoiseFilter<'a> {
    pub fn new(thresholds: &'a NoiseThresholds) -> Self {
        Self { thresholds }
    }

    pub fn filter(&self, records: Vec<CombinedCauseRecord>) -> Vec<CombinedCauseRecord> {
        let before = records.len();

        // Cause-specific count floors.
        let survivors: Vec<CombinedCauseRecord> = records
            .into_iter()
            .filter(|r| {
                let routing_noise =
                    r.cause == Cause::Routing && r.count <= self.thresholds.routing_count_floor;
                let transport_noise =
                    r.cause == Cause::Transport && r.count <= self.thresholds.transport_count_floor;
                !(routing_noise || transport_noise)
            })
            .collect();

        // Generic ratio floor, dispatch-sign excepted.
        let survivors: Vec<CombinedCauseRecord> = survivors
            .into_iter()
            .filter(|r| r.cause == Cause::DispatchSign || r.ratio >= self.thresholds.ratio_floor)
            .collect();

        log::debug!("noise filter: {before} records in, {} out", survivors.len());

        survivors
    }
}
