//! The current-period wide snapshot — one row per (date, route), one named
//! column per per-cause metric plus two route-level columns.
//!
//! The snapshot arrives already parsed; this module only holds it and
//! answers schema questions. Cells hold `Option<f64>` because an upstream
//! division can legitimately be undefined — absence is preserved, never
//! coerced to zero.

use crate::config::ReportConfig;
use crate::error::{ReportError, ReportResult};
use crate::types::RouteName;
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct WideRow {
    pub date: NaiveDate,
    pub route: RouteName,
    /// Raw column name → metric value.
    pub cells: BTreeMap<String, Option<f64>>,
}

impl WideRow {
    pub fn new(date: NaiveDate, route: &str) -> Self {
        Self {
            date,
            route: route.to_string(),
            cells: BTreeMap::new(),
        }
    }

    pub fn with_cell(mut self, column: &str, value: Option<f64>) -> Self {
        self.cells.insert(column.to_string(), value);
        self
    }

    /// A cell that is absent from the row entirely counts as undefined,
    /// same as an explicit None.
    pub fn cell(&self, column: &str) -> Option<f64> {
        self.cells.get(column).copied().flatten()
    }
}

/// Route-level figures carried alongside the per-cause metrics, in percent
/// as exported.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteFigures {
    pub gap_to_first_pct: Option<f64>,
    pub shortfall: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct WideSnapshot {
    columns: Vec<String>,
    rows: Vec<WideRow>,
}

impl WideSnapshot {
    pub fn new(columns: Vec<String>, rows: Vec<WideRow>) -> Self {
        Self { columns, rows }
    }

    pub fn rows(&self) -> &[WideRow] {
        &self.rows
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Fails with `SchemaMismatch` if the named column is not part of the
    /// snapshot's declared column set.
    pub fn require_column(&self, column: &str) -> ReportResult<()> {
        if self.columns.iter().any(|c| c == column) {
            Ok(())
        } else {
            Err(ReportError::SchemaMismatch {
                column: column.to_string(),
                table: "wide snapshot",
            })
        }
    }

    /// Per-route gap/shortfall lookup. First occurrence of a route wins;
    /// a snapshot holds one period so routes do not normally repeat.
    pub fn route_figures(
        &self,
        config: &ReportConfig,
    ) -> ReportResult<BTreeMap<RouteName, RouteFigures>> {
        self.require_column(&config.gap_column)?;
        self.require_column(&config.shortfall_column)?;

        let mut figures: BTreeMap<RouteName, RouteFigures> = BTreeMap::new();
        for row in &self.rows {
            figures
                .entry(row.route.clone())
                .or_insert_with(|| RouteFigures {
                    gap_to_first_pct: row.cell(&config.gap_column),
                    shortfall: row.cell(&config.shortfall_column),
                });
        }
        Ok(figures)
    }
}
