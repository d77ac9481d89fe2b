//! Shared primitive types used across the entire pipeline.

use crate::error::ReportError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named city-to-city delivery line. The primary grouping key for ranking.
pub type RouteName = String;

/// Canonical delay cause. A closed set: raw snapshot columns are mapped to
/// one of these variants through the config column map, never by substring
/// matching on the column label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cause {
    Routing,
    DepotHandoff,
    Outbound,
    Transport,
    Inbound,
    /// Permanently tracked operational cause. Exempt from the rank cutoff
    /// and from every noise threshold.
    DispatchSign,
}

impl Cause {
    pub fn label(self) -> &'static str {
        match self {
            Cause::Routing => "routing",
            Cause::DepotHandoff => "depot-handoff",
            Cause::Outbound => "outbound",
            Cause::Transport => "transport",
            Cause::Inbound => "inbound",
            Cause::DispatchSign => "dispatch-sign",
        }
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Cause {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "routing" => Ok(Cause::Routing),
            "depot-handoff" => Ok(Cause::DepotHandoff),
            "outbound" => Ok(Cause::Outbound),
            "transport" => Ok(Cause::Transport),
            "inbound" => Ok(Cause::Inbound),
            "dispatch-sign" => Ok(Cause::DispatchSign),
            other => Err(ReportError::InvalidArgument {
                what: "cause",
                value: other.to_string(),
            }),
        }
    }
}

/// Which of the two parallel metric views a wide column belongs to.
///
/// Parsed once at the boundary; an unrecognized label fails with
/// `InvalidArgument` before any computation starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Ratio,
    Count,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Ratio => "ratio",
            MetricKind::Count => "count",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ratio" => Ok(MetricKind::Ratio),
            "count" => Ok(MetricKind::Count),
            other => Err(ReportError::InvalidArgument {
                what: "metric kind",
                value: other.to_string(),
            }),
        }
    }
}
