//! Projection metrics collection
//!
//! Counters gathered alongside a projection run, for debugging a scenario
//! ("why does the warning fire?") and for the CLI summary.

use jiff::civil::Date;
use serde::Serialize;

use crate::model::SavingsWarning;

/// A month at which the savings warning got worse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarningEscalation {
    pub month: usize,
    pub date: Date,
    pub warning: SavingsWarning,
}

/// Metrics collected during one projection
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationMetrics {
    /// Months stepped through (point 0 excluded)
    pub months_simulated: u64,
    /// Months where something was allocated
    pub months_invested: u64,
    /// Months where cash flow did not cover the investment
    pub months_drawing_savings: u64,
    pub total_invested: f64,
    pub total_events_impact: f64,
    /// Debt payments plus insurance
    pub total_debt_paid: f64,
    pub escalations: Vec<WarningEscalation>,
}

impl SimulationMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_month(&mut self, invested: f64, events_impact: f64, debt_paid: f64) {
        self.months_simulated += 1;
        if invested > 0.0 {
            self.months_invested += 1;
        }
        self.total_invested += invested;
        self.total_events_impact += events_impact;
        self.total_debt_paid += debt_paid;
    }

    pub fn record_savings_draw(&mut self) {
        self.months_drawing_savings += 1;
    }

    /// Record the warning after a month; only changes are kept.
    pub fn record_warning(&mut self, month: usize, date: Date, warning: SavingsWarning) {
        let previous = self
            .escalations
            .last()
            .map(|e| e.warning)
            .unwrap_or_default();
        if warning > previous {
            self.escalations.push(WarningEscalation {
                month,
                date,
                warning,
            });
        }
    }

    /// Month at which the warning first appeared, if ever.
    #[must_use]
    pub fn first_warning_month(&self) -> Option<usize> {
        self.escalations.first().map(|e| e.month)
    }

    /// Share of simulated months that drew on savings, in `[0, 1]`.
    #[must_use]
    pub fn savings_draw_ratio(&self) -> f64 {
        if self.months_simulated == 0 {
            0.0
        } else {
            self.months_drawing_savings as f64 / self.months_simulated as f64
        }
    }
}
