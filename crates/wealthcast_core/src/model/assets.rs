//! Assets (holdings) as recorded by the portfolio
//!
//! The engine only reads assets. Quantified assets (shares, coins, ounces)
//! carry a quantity and unit price; everything else is a plain value.

use serde::{Deserialize, Serialize};

use super::classes::{AssetClass, ClassValues};
use super::ids::AssetId;
use super::lenient::{self, finite_or_zero};

/// A single holding in the portfolio
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    #[serde(default)]
    pub id: AssetId,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub class: AssetClass,
    #[serde(default)]
    pub is_quantified: bool,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub quantity: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub unit_price: Option<f64>,
    /// Average purchase price per unit
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub cost_price: Option<f64>,
    /// Current worth for non-quantified assets
    #[serde(default, deserialize_with = "lenient::number")]
    pub value: f64,
}

impl Asset {
    /// Current worth: `quantity × unitPrice` when quantified, else `value`.
    pub fn current_value(&self) -> f64 {
        match (self.is_quantified, self.quantity, self.unit_price) {
            (true, Some(quantity), Some(price)) => finite_or_zero(quantity * price),
            _ => finite_or_zero(self.value),
        }
    }

    /// `costPrice × quantity` when a cost price is recorded, otherwise the
    /// current value (no unrealized gain assumed).
    pub fn cost_basis(&self) -> f64 {
        self.recorded_cost().unwrap_or_else(|| self.current_value())
    }

    pub fn unrealized_gain(&self) -> f64 {
        self.current_value() - self.cost_basis()
    }

    /// Return since purchase as a fraction, `0` without a recorded cost.
    pub fn performance(&self) -> f64 {
        match self.recorded_cost() {
            Some(cost) if cost > 0.0 => (self.current_value() - cost) / cost,
            _ => 0.0,
        }
    }

    fn recorded_cost(&self) -> Option<f64> {
        let quantity = self.quantity.filter(|_| self.is_quantified)?;
        let cost_price = self.cost_price.filter(|&c| c > 0.0)?;
        Some(finite_or_zero(quantity * cost_price))
    }
}

/// Current value per asset class.
pub fn class_values(assets: &[Asset]) -> ClassValues {
    assets
        .iter()
        .map(|a| (a.class, a.current_value()))
        .collect()
}

/// Cost basis per asset class.
pub fn class_basis(assets: &[Asset]) -> ClassValues {
    assets.iter().map(|a| (a.class, a.cost_basis())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shares(quantity: f64, price: f64, cost: Option<f64>) -> Asset {
        Asset {
            id: AssetId::new("a"),
            name: "ACME".into(),
            class: AssetClass::Stock,
            is_quantified: true,
            quantity: Some(quantity),
            unit_price: Some(price),
            cost_price: cost,
            value: 0.0,
        }
    }

    #[test]
    fn test_quantified_value_and_basis() {
        let asset = shares(10.0, 150.0, Some(120.0));
        assert_eq!(asset.current_value(), 1500.0);
        assert_eq!(asset.cost_basis(), 1200.0);
        assert_eq!(asset.unrealized_gain(), 300.0);
        assert!((asset.performance() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_missing_cost_means_no_gain() {
        let asset = shares(10.0, 150.0, None);
        assert_eq!(asset.cost_basis(), 1500.0);
        assert_eq!(asset.unrealized_gain(), 0.0);
        assert_eq!(asset.performance(), 0.0);
    }

    #[test]
    fn test_plain_value_asset() {
        let asset = Asset {
            class: AssetClass::RealEstate,
            value: 250_000.0,
            cost_price: Some(100.0),
            ..Default::default()
        };
        assert_eq!(asset.current_value(), 250_000.0);
        assert_eq!(asset.cost_basis(), 250_000.0);
    }

    #[test]
    fn test_class_values_sum_by_class() {
        let assets = vec![
            shares(1.0, 100.0, Some(50.0)),
            shares(2.0, 100.0, None),
            Asset {
                class: AssetClass::Cash,
                value: 500.0,
                ..Default::default()
            },
        ];
        let values = class_values(&assets);
        let basis = class_basis(&assets);
        assert_eq!(values[AssetClass::Stock], 300.0);
        assert_eq!(basis[AssetClass::Stock], 250.0);
        assert_eq!(values[AssetClass::Cash], 500.0);
        assert_eq!(basis[AssetClass::Cash], 500.0);
    }
}
