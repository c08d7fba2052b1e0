//! Projection configuration
//!
//! `ProjectionConfig` carries every input the engine reads. It is plain data
//! that round-trips through serde, so the dashboard can hand over exactly
//! what it stores. "Now" is deliberately not part of it: the caller passes
//! the reference date to each run.
//!
//! # Builder DSL
//!
//! ```ignore
//! use wealthcast_core::config::{AssetBuilder, DebtBuilder, EventBuilder, ProjectionBuilder};
//! use wealthcast_core::model::{AssetClass, Strategy};
//!
//! let config = ProjectionBuilder::new()
//!     .horizon_months(240)
//!     .income("Salary", 4_200.0)
//!     .expense("Rent", 1_400.0)
//!     .asset(AssetBuilder::stock("VWCE").quantity(40.0).price(110.0).cost(95.0))
//!     .asset(AssetBuilder::cash("Savings").value(8_000.0))
//!     .debt(DebtBuilder::new("Car loan").payment(320.0).rate(4.9).ends(2029, 6, 1))
//!     .event(EventBuilder::expense("Holidays").amount(1_800.0).on(2027, 7, 1).yearly())
//!     .target(AssetClass::Stock, 70.0)
//!     .target(AssetClass::Cash, 30.0)
//!     .yield_rate(AssetClass::Stock, 7.0)
//!     .investment_goal(600.0)
//!     .strategy(Strategy::Smart)
//!     .build()?;
//! ```

use serde::{Deserialize, Serialize};

use crate::model::lenient;
use crate::model::{Asset, BudgetSnapshot, CashEvent, ClassValues, Debt, Strategy};

mod asset_builder;
mod builder;
mod debt_builder;
mod event_builder;

pub use asset_builder::AssetBuilder;
pub use builder::ProjectionBuilder;
pub use debt_builder::DebtBuilder;
pub use event_builder::EventBuilder;

/// Longest projection the engine will run, in months.
pub const MAX_HORIZON_MONTHS: usize = 600;

fn default_horizon_months() -> usize {
    120
}

/// Everything needed to run a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionConfig {
    // === Current situation ===
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub debts: Vec<Debt>,
    #[serde(default)]
    pub events: Vec<CashEvent>,
    #[serde(default)]
    pub budget: BudgetSnapshot,

    // === Plan ===
    /// Amount to invest each month, when cash allows
    #[serde(default, deserialize_with = "lenient::number")]
    pub investment_goal: f64,
    /// Target allocation in percent per class (need not sum to 100)
    #[serde(default)]
    pub targets: ClassValues,
    #[serde(default)]
    pub strategy: Strategy,

    // === Assumptions ===
    /// Expected annual yield in percent per class
    #[serde(default)]
    pub yields: ClassValues,
    /// Months to project forward from now
    #[serde(default = "default_horizon_months")]
    pub horizon_months: usize,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            assets: Vec::new(),
            debts: Vec::new(),
            events: Vec::new(),
            budget: BudgetSnapshot::default(),
            investment_goal: 0.0,
            targets: ClassValues::default(),
            strategy: Strategy::default(),
            yields: ClassValues::default(),
            horizon_months: default_horizon_months(),
        }
    }
}

impl ProjectionConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Horizon actually simulated, capped at [`MAX_HORIZON_MONTHS`].
    pub fn effective_horizon(&self) -> usize {
        self.horizon_months.min(MAX_HORIZON_MONTHS)
    }

    // === What-if helpers ===

    /// Same inputs, different allocation strategy.
    #[must_use]
    pub fn with_strategy(&self, strategy: Strategy) -> Self {
        Self {
            strategy,
            ..self.clone()
        }
    }

    /// Same inputs, different horizon.
    #[must_use]
    pub fn with_horizon(&self, horizon_months: usize) -> Self {
        Self {
            horizon_months,
            ..self.clone()
        }
    }

    /// Same inputs, different monthly investment goal.
    #[must_use]
    pub fn with_investment_goal(&self, investment_goal: f64) -> Self {
        Self {
            investment_goal,
            ..self.clone()
        }
    }
}
