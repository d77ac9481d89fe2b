//! ChangeClassifier — label each reconciled issue.
//!
//! Precedence is fixed: the default applies first, then the three override
//! conditions in order. A defined delta always wins over the
//! resolved/auto-resolved distinction, which only applies when the issue
//! produced no comparable measurement this period.

use crate::followup::MatchedRow;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChangeStatus {
    #[serde(rename = "gap expanding")]
    GapExpanding,
    #[serde(rename = "gap narrowing")]
    GapNarrowing,
    /// The tracked issue had a concrete location and no longer shows up —
    /// treated as actively eliminated.
    #[serde(rename = "resolved")]
    Resolved,
    /// Fallthrough: no measurable movement and nothing concrete was being
    /// tracked.
    #[serde(rename = "auto-resolved")]
    AutoResolved,
}

impl ChangeStatus {
    pub fn label(self) -> &'static str {
        match self {
            ChangeStatus::GapExpanding => "gap expanding",
            ChangeStatus::GapNarrowing => "gap narrowing",
            ChangeStatus::Resolved => "resolved",
            ChangeStatus::AutoResolved => "auto-resolved",
        }
    }
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub struct ChangeClassifier;

impl ChangeClassifier {
    pub fn classify(&self, row: &MatchedRow) -> ChangeStatus {
        match row.delta {
            Some(delta) if delta > 0.0 => ChangeStatus::GapExpanding,
            Some(delta) if delta < 0.0 => ChangeStatus::GapNarrowing,
            None if row.item.location.is_some() => ChangeStatus::Resolved,
            _ => ChangeStatus::AutoResolved,
        }
    }
}
