//! Wealth projection and allocation engine
//!
//! Given a snapshot of a household's finances, this crate projects net worth
//! month by month and decides how each month's savings are invested:
//! - Amortizing debts, with principal recomputed in closed form each month
//! - One-off and recurring cash events (weekly, monthly, yearly, every N months)
//! - Per-class compounding of asset buckets under expected yields
//! - Three allocation policies: fixed split, gap rebalancing, and
//!   conviction-weighted holding selection
//! - A "worst seen" savings warning when investing has to draw on savings
//!
//! Every entry point is a pure function of its inputs and the caller's
//! reference date.
//!
//! # Builder DSL
//!
//! ```ignore
//! use wealthcast_core::config::{AssetBuilder, ProjectionBuilder};
//! use wealthcast_core::model::{AssetClass, Strategy};
//! use wealthcast_core::simulation::simulate;
//!
//! let config = ProjectionBuilder::new()
//!     .horizon_years(10)
//!     .income("Salary", 3_500.0)
//!     .expense("Living", 2_400.0)
//!     .asset(AssetBuilder::cash("Savings").value(10_000.0))
//!     .target(AssetClass::Stock, 80.0)
//!     .target(AssetClass::Cash, 20.0)
//!     .investment_goal(500.0)
//!     .strategy(Strategy::Smart)
//!     .build()?;
//!
//! let projection = simulate(&config, jiff::civil::date(2026, 10, 19));
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod allocation;
pub mod amortization;
pub mod date_math;
pub mod error;
pub mod metrics;
pub mod recurrence;
pub mod simulation;
pub mod simulation_state;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use allocation::{AllocationPlan, allocate, current_allocation, recommended_plan};
pub use amortization::{DebtSummary, summarize_debts};
pub use config::{AssetBuilder, DebtBuilder, EventBuilder, ProjectionBuilder, ProjectionConfig};
pub use error::ConfigError;
pub use recurrence::impact_series;
pub use simulation::{simulate, simulate_horizons, simulate_with_metrics};
