//! Bucket state threaded through a projection
//!
//! One value and one cost basis per asset class. Every operation consumes
//! the state and returns the next one, so a run can be written as a fold and
//! two runs can never observe each other's accumulators.

use crate::model::lenient::finite_or_zero;
use crate::model::{Asset, AssetClass, ClassValues, class_basis, class_values};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BucketState {
    pub values: ClassValues,
    pub basis: ClassValues,
}

impl BucketState {
    pub fn from_assets(assets: &[Asset]) -> Self {
        Self {
            values: class_values(assets),
            basis: class_basis(assets),
        }
    }

    /// Compound one month: `value *= 1 + yield / 100 / 12`. Basis is untouched.
    #[must_use]
    pub fn grown(self, yields: &ClassValues) -> Self {
        Self {
            values: self
                .values
                .map(|class, value| value * (1.0 + finite_or_zero(yields.get(class)) / 100.0 / 12.0)),
            basis: self.basis,
        }
    }

    /// Add (or, if negative, remove) cash; cash basis moves one for one.
    #[must_use]
    pub fn deposit_cash(mut self, amount: f64) -> Self {
        self.values[AssetClass::Cash] += amount;
        self.basis[AssetClass::Cash] += amount;
        self
    }

    #[must_use]
    pub fn withdraw_cash(self, amount: f64) -> Self {
        self.deposit_cash(-amount)
    }

    /// Buy into each class at cost.
    #[must_use]
    pub fn invest(self, per_class: &ClassValues) -> Self {
        Self {
            values: self.values.plus(per_class),
            basis: self.basis.plus(per_class),
        }
    }

    pub fn cash(&self) -> f64 {
        self.values[AssetClass::Cash]
    }

    pub fn total_value(&self) -> f64 {
        self.values.total()
    }

    pub fn total_basis(&self) -> f64 {
        self.basis.total()
    }

    pub fn unrealized_gain(&self) -> f64 {
        self.total_value() - self.total_basis()
    }
}
