//! Projection Builder
//!
//! Fluent API for assembling a [`ProjectionConfig`] in code, with automatic
//! id assignment. Ids given explicitly are kept; the rest are numbered per
//! kind (`asset-1`, `debt-1`, `event-1`, ...). Dates are validated at
//! [`ProjectionBuilder::build`].

use rustc_hash::FxHashSet;

use super::ProjectionConfig;
use super::asset_builder::AssetBuilder;
use super::debt_builder::DebtBuilder;
use super::event_builder::EventBuilder;
use crate::error::{ConfigError, Result};
use crate::model::{AssetClass, AssetId, BudgetCategory, DebtId, EventId, Strategy};

/// Builder for projection inputs
pub struct ProjectionBuilder {
    config: ProjectionConfig,
    next_income_id: u32,
    next_expense_id: u32,

    // Pending builders (resolved during build)
    pending_assets: Vec<AssetBuilder>,
    pending_debts: Vec<DebtBuilder>,
    pending_events: Vec<EventBuilder>,
}

impl Default for ProjectionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectionBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ProjectionConfig::default(),
            next_income_id: 0,
            next_expense_id: 0,
            pending_assets: Vec::new(),
            pending_debts: Vec::new(),
            pending_events: Vec::new(),
        }
    }

    // =========================================================================
    // Basic Configuration
    // =========================================================================

    #[must_use]
    pub fn horizon_months(mut self, months: usize) -> Self {
        self.config.horizon_months = months;
        self
    }

    #[must_use]
    pub fn horizon_years(self, years: usize) -> Self {
        self.horizon_months(years * 12)
    }

    #[must_use]
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Amount to invest each month
    #[must_use]
    pub fn investment_goal(mut self, amount: f64) -> Self {
        self.config.investment_goal = amount;
        self
    }

    /// Target allocation for one class, in percent
    #[must_use]
    pub fn target(mut self, class: AssetClass, percent: f64) -> Self {
        self.config.targets[class] = percent;
        self
    }

    /// Expected annual yield for one class, in percent
    #[must_use]
    pub fn yield_rate(mut self, class: AssetClass, percent: f64) -> Self {
        self.config.yields[class] = percent;
        self
    }

    // =========================================================================
    // Budget
    // =========================================================================

    /// Add a monthly income line
    #[must_use]
    pub fn income(mut self, name: impl Into<String>, amount: f64) -> Self {
        self.next_income_id += 1;
        let category = BudgetCategory::new(format!("income-{}", self.next_income_id), name);
        self.config.budget.add_income(category, amount);
        self
    }

    /// Add a monthly expense line
    #[must_use]
    pub fn expense(mut self, name: impl Into<String>, amount: f64) -> Self {
        self.next_expense_id += 1;
        let category = BudgetCategory::new(format!("expense-{}", self.next_expense_id), name);
        self.config.budget.add_expense(category, amount);
        self
    }

    // =========================================================================
    // Assets, debts and events
    // =========================================================================

    #[must_use]
    pub fn asset(mut self, builder: AssetBuilder) -> Self {
        self.pending_assets.push(builder);
        self
    }

    #[must_use]
    pub fn debt(mut self, builder: DebtBuilder) -> Self {
        self.pending_debts.push(builder);
        self
    }

    #[must_use]
    pub fn event(mut self, builder: EventBuilder) -> Self {
        self.pending_events.push(builder);
        self
    }

    // =========================================================================
    // Build
    // =========================================================================

    /// Resolve pending builders into a config.
    ///
    /// Fails on an impossible date or on two entities of one kind sharing
    /// an id.
    pub fn build(mut self) -> Result<ProjectionConfig> {
        self.config.assets = self
            .pending_assets
            .into_iter()
            .enumerate()
            .map(|(i, b)| b.build(AssetId::new(format!("asset-{}", i + 1))))
            .collect();
        self.config.debts = self
            .pending_debts
            .into_iter()
            .enumerate()
            .map(|(i, b)| b.build(DebtId::new(format!("debt-{}", i + 1))))
            .collect::<Result<_>>()?;
        self.config.events = self
            .pending_events
            .into_iter()
            .enumerate()
            .map(|(i, b)| b.build(EventId::new(format!("event-{}", i + 1))))
            .collect::<Result<_>>()?;

        ensure_unique(self.config.assets.iter().map(|a| a.id.as_str()))?;
        ensure_unique(self.config.debts.iter().map(|d| d.id.as_str()))?;
        ensure_unique(self.config.events.iter().map(|e| e.id.as_str()))?;

        Ok(self.config)
    }
}

fn ensure_unique<'a>(ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = FxHashSet::default();
    for id in ids {
        if !seen.insert(id) {
            return Err(ConfigError::DuplicateId(id.to_string()));
        }
    }
    Ok(())
}
