//! delay-report-core — per-route delay-cause ranking and follow-up
//! reconciliation.
//!
//! Takes one period's wide metric snapshot plus the previous period's
//! tracked action items and produces the consolidated management report:
//! top delay causes per route, reconciled against the baseline and labeled
//! as expanding, narrowing, resolved, or auto-resolved.
//!
//! The whole pipeline is synchronous, in-memory, and deterministic; all
//! file handling lives in the runner, not here.

pub mod baseline;
pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod filter;
pub mod followup;
pub mod merge;
pub mod report;
pub mod snapshot;
pub mod types;

pub use baseline::ActionItem;
pub use classify::ChangeStatus;
pub use config::ReportConfig;
pub use engine::ReportEngine;
pub use error::{ReportError, ReportResult};
pub use report::{ReconciledRow, REPORT_COLUMNS};
pub use snapshot::{WideRow, WideSnapshot};
pub use types::{Cause, MetricKind};
