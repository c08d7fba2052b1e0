//! Asset Builder DSL
//!
//! ```ignore
//! use wealthcast_core::config::AssetBuilder;
//!
//! // Quantified holding: 12 shares bought at 80, now at 95
//! let etf = AssetBuilder::stock("VWCE").quantity(12.0).price(95.0).cost(80.0);
//!
//! // Plain value
//! let livret = AssetBuilder::cash("Livret A").value(15_000.0);
//! ```

use crate::model::{Asset, AssetClass, AssetId};

/// Builder for a single holding
#[derive(Debug, Clone)]
pub struct AssetBuilder {
    pub(crate) id: Option<String>,
    pub(crate) name: String,
    pub(crate) class: AssetClass,
    pub(crate) quantity: Option<f64>,
    pub(crate) unit_price: Option<f64>,
    pub(crate) cost_price: Option<f64>,
    pub(crate) value: f64,
}

impl AssetBuilder {
    #[must_use]
    pub fn new(name: impl Into<String>, class: AssetClass) -> Self {
        Self {
            id: None,
            name: name.into(),
            class,
            quantity: None,
            unit_price: None,
            cost_price: None,
            value: 0.0,
        }
    }

    // =========================================================================
    // Presets
    // =========================================================================

    #[must_use]
    pub fn stock(name: impl Into<String>) -> Self {
        Self::new(name, AssetClass::Stock)
    }

    #[must_use]
    pub fn crypto(name: impl Into<String>) -> Self {
        Self::new(name, AssetClass::Crypto)
    }

    #[must_use]
    pub fn metal(name: impl Into<String>) -> Self {
        Self::new(name, AssetClass::Metal)
    }

    #[must_use]
    pub fn cash(name: impl Into<String>) -> Self {
        Self::new(name, AssetClass::Cash)
    }

    #[must_use]
    pub fn real_estate(name: impl Into<String>) -> Self {
        Self::new(name, AssetClass::RealEstate)
    }

    // =========================================================================
    // Fields
    // =========================================================================

    /// Use an explicit id instead of an auto-assigned one
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Number of units held; makes the asset quantified
    #[must_use]
    pub fn quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Current price per unit
    #[must_use]
    pub fn price(mut self, unit_price: f64) -> Self {
        self.unit_price = Some(unit_price);
        self
    }

    /// Average purchase price per unit
    #[must_use]
    pub fn cost(mut self, cost_price: f64) -> Self {
        self.cost_price = Some(cost_price);
        self
    }

    /// Current worth of a non-quantified asset
    #[must_use]
    pub fn value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub(crate) fn build(self, fallback_id: AssetId) -> Asset {
        let is_quantified = self.quantity.is_some();
        Asset {
            id: self.id.map(AssetId::new).unwrap_or(fallback_id),
            name: self.name,
            class: self.class,
            is_quantified,
            quantity: self.quantity,
            unit_price: self.unit_price,
            cost_price: self.cost_price,
            value: self.value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantified_asset() {
        let asset = AssetBuilder::stock("ACME")
            .quantity(10.0)
            .price(12.0)
            .cost(10.0)
            .build(AssetId::new("asset-1"));
        assert!(asset.is_quantified);
        assert_eq!(asset.id, AssetId::new("asset-1"));
        assert_eq!(asset.current_value(), 120.0);
        assert_eq!(asset.cost_basis(), 100.0);
    }

    #[test]
    fn test_plain_value_keeps_explicit_id() {
        let asset = AssetBuilder::cash("Savings")
            .id("savings")
            .value(500.0)
            .build(AssetId::new("asset-1"));
        assert!(!asset.is_quantified);
        assert_eq!(asset.id, AssetId::new("savings"));
        assert_eq!(asset.current_value(), 500.0);
    }
}
