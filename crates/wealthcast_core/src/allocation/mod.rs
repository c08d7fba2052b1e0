//! Allocation of new savings across asset classes
//!
//! Each [`Strategy`] maps to one [`AllocationPolicy`]:
//!
//! - `dca` → [`FixedSplit`]: split by target percentage, ignoring balances
//! - `smart` → [`GapRebalance`]: fund only underweight classes, in proportion
//!   to how far each is below its target
//! - `active` → [`ConvictionWeighted`]: the `smart` class split, then a
//!   further split across the holdings inside each class that favours the
//!   ones lagging the class leader
//!
//! Only [`AssetClass::INVESTABLE`] classes receive money. Targets are
//! normalized by `max(1, Σ targets)` over those classes, and negative or
//! non-finite inputs count as zero, so no policy can divide by zero or hand
//! out more than it was given.

mod conviction;
mod fixed;
mod gap;

pub use conviction::ConvictionWeighted;
pub use fixed::FixedSplit;
pub use gap::GapRebalance;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ProjectionConfig;
use crate::model::lenient::finite_or_zero;
use crate::model::{Asset, AssetClass, AssetId, ClassValues, Strategy, class_values};

/// Why a class received (or did not receive) money
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AllocationReason {
    #[serde(rename = "fixed split")]
    FixedSplit,
    #[serde(rename = "underweight")]
    Underweight,
    #[serde(rename = "overweight")]
    Overweight,
}

impl fmt::Display for AllocationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AllocationReason::FixedSplit => "fixed split",
            AllocationReason::Underweight => "underweight",
            AllocationReason::Overweight => "overweight",
        })
    }
}

/// Class-level line of an allocation plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassAllocation {
    pub class: AssetClass,
    pub amount: f64,
    /// Normalized target share, in percent
    pub target_percent: f64,
    pub current_value: f64,
    /// Value the class should have after investing (`smart`/`active` only)
    pub target_value: Option<f64>,
    /// `target_value - current_value` (`smart`/`active` only)
    pub gap: Option<f64>,
    pub reason: AllocationReason,
}

/// Holding-level line of an `active` plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingAllocation {
    pub asset_id: AssetId,
    pub name: String,
    pub class: AssetClass,
    pub amount: f64,
    /// Return since purchase, as a fraction
    pub performance: f64,
}

/// Output of one allocation: per-class amounts plus, for `active`, the
/// breakdown across individual holdings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationPlan {
    pub classes: Vec<ClassAllocation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub holdings: Vec<HoldingAllocation>,
}

impl AllocationPlan {
    pub fn amount(&self, class: AssetClass) -> f64 {
        self.classes
            .iter()
            .find(|line| line.class == class)
            .map(|line| line.amount)
            .unwrap_or(0.0)
    }

    pub fn per_class(&self) -> ClassValues {
        self.classes.iter().map(|line| (line.class, line.amount)).collect()
    }

    /// Total handed out; never more than the requested amount.
    pub fn total(&self) -> f64 {
        self.classes.iter().map(|line| line.amount).sum()
    }

    pub fn holdings_for(&self, class: AssetClass) -> impl Iterator<Item = &HoldingAllocation> {
        self.holdings.iter().filter(move |h| h.class == class)
    }
}

/// Inputs to a single allocation decision
#[derive(Debug, Clone, Copy)]
pub struct AllocationRequest<'a> {
    pub amount: f64,
    pub current: &'a ClassValues,
    pub targets: &'a ClassValues,
    /// Individual holdings, consulted by `active` only
    pub holdings: &'a [Asset],
}

impl AllocationRequest<'_> {
    /// Investable amount, non-finite or negative treated as 0.
    pub fn investable(&self) -> f64 {
        finite_or_zero(self.amount).max(0.0)
    }

    pub fn target(&self, class: AssetClass) -> f64 {
        clean_target(self.targets.get(class))
    }

    pub fn total_target(&self) -> f64 {
        total_target(self.targets)
    }

    /// Normalized target share of `class` in `[0, 1]`.
    pub fn target_share(&self, class: AssetClass) -> f64 {
        self.target(class) / self.total_target()
    }
}

#[inline]
fn clean_target(t: f64) -> f64 {
    finite_or_zero(t).max(0.0)
}

/// `max(1, Σ targets)` over the investable classes.
pub fn total_target(targets: &ClassValues) -> f64 {
    AssetClass::INVESTABLE
        .iter()
        .map(|&class| clean_target(targets.get(class)))
        .sum::<f64>()
        .max(1.0)
}

/// A way of splitting an investable amount across asset classes
pub trait AllocationPolicy: Send + Sync {
    fn strategy(&self) -> Strategy;

    fn allocate(&self, request: &AllocationRequest<'_>) -> AllocationPlan;
}

static FIXED_SPLIT: FixedSplit = FixedSplit;
static GAP_REBALANCE: GapRebalance = GapRebalance;
static CONVICTION_WEIGHTED: ConvictionWeighted = ConvictionWeighted;

impl Strategy {
    pub fn policy(self) -> &'static dyn AllocationPolicy {
        match self {
            Strategy::Dca => &FIXED_SPLIT,
            Strategy::Smart => &GAP_REBALANCE,
            Strategy::Active => &CONVICTION_WEIGHTED,
        }
    }
}

/// Split `amount` across asset classes according to `strategy`.
pub fn allocate(
    amount: f64,
    current: &ClassValues,
    targets: &ClassValues,
    strategy: Strategy,
    holdings: &[Asset],
) -> AllocationPlan {
    strategy.policy().allocate(&AllocationRequest {
        amount,
        current,
        targets,
        holdings,
    })
}

/// The "recommended monthly plan": the investment goal allocated against
/// today's balances and holdings.
pub fn recommended_plan(config: &ProjectionConfig) -> AllocationPlan {
    let current = class_values(&config.assets);
    allocate(
        config.investment_goal,
        &current,
        &config.targets,
        config.strategy,
        &config.assets,
    )
}

/// Current weight of a class against its target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassWeight {
    pub class: AssetClass,
    pub value: f64,
    /// Share of total assets, in percent
    pub current_percent: f64,
    /// Normalized target share, in percent (0 for non-investable classes)
    pub target_percent: f64,
    /// `current_percent - target_percent`, in percentage points
    pub drift: f64,
}

/// Current allocation of the whole portfolio against the targets.
pub fn current_allocation(assets: &[Asset], targets: &ClassValues) -> Vec<ClassWeight> {
    let values = class_values(assets);
    let total = values.total();
    let total_target = total_target(targets);

    AssetClass::ALL
        .iter()
        .map(|&class| {
            let value = values.get(class);
            let current_percent = if total > 0.0 {
                value / total * 100.0
            } else {
                0.0
            };
            let target_percent = if class.is_investable() {
                clean_target(targets.get(class)) / total_target * 100.0
            } else {
                0.0
            };
            ClassWeight {
                class,
                value,
                current_percent,
                target_percent,
                drift: current_percent - target_percent,
            }
        })
        .collect()
}
