//! Scenario files
//!
//! A scenario is one YAML document: a display name, an optional fixed
//! reference date, and the projection inputs.
//!
//! ```yaml
//! name: Household
//! asOf: 2026-10-19
//! projection:
//!   horizonMonths: 240
//!   investmentGoal: 600
//!   strategy: smart
//!   ...
//! ```

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use wealthcast_core::config::{AssetBuilder, DebtBuilder, EventBuilder, ProjectionBuilder};
use wealthcast_core::model::{AssetClass, Strategy};
use wealthcast_core::{ConfigError, ProjectionConfig};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioFile {
    #[serde(default)]
    pub name: String,
    /// Reference date for the projection; today when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<Date>,
    #[serde(default)]
    pub projection: ProjectionConfig,
}

impl ScenarioFile {
    pub fn new(name: impl Into<String>, projection: ProjectionConfig) -> Self {
        Self {
            name: name.into(),
            as_of: None,
            projection,
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(content)
    }

    pub fn to_yaml(&self) -> Result<String, serde_saphyr::ser::Error> {
        serde_saphyr::to_string(self)
    }

    /// Reference date: the pinned `asOf`, else `today`.
    pub fn reference_date(&self, today: Date) -> Date {
        self.as_of.unwrap_or(today)
    }

    /// A small household to start from, written by `wealthcast init`.
    pub fn sample(name: impl Into<String>) -> Result<Self, ConfigError> {
        let projection = ProjectionBuilder::new()
            .horizon_years(20)
            .income("Salary", 4_200.0)
            .expense("Rent", 1_350.0)
            .expense("Groceries & bills", 950.0)
            .asset(AssetBuilder::stock("World ETF").quantity(40.0).price(110.0).cost(95.0))
            .asset(AssetBuilder::crypto("Bitcoin").quantity(0.05).price(60_000.0).cost(35_000.0))
            .asset(AssetBuilder::metal("Gold coins").quantity(4.0).price(2_300.0).cost(1_900.0))
            .asset(AssetBuilder::cash("Savings account").value(9_000.0))
            .debt(DebtBuilder::new("Car loan").payment(320.0).insurance(12.0).rate(4.9).ends(2029, 6, 1))
            .event(EventBuilder::expense("Summer holidays").amount(1_800.0).on(2027, 7, 1).yearly())
            .event(EventBuilder::income("Annual bonus").amount(2_500.0).on(2027, 3, 1).yearly())
            .event(EventBuilder::expense("Home insurance").amount(180.0).on(2026, 12, 1).every_months(3))
            .target(AssetClass::Stock, 65.0)
            .target(AssetClass::Crypto, 5.0)
            .target(AssetClass::Metal, 10.0)
            .target(AssetClass::Cash, 20.0)
            .yield_rate(AssetClass::Stock, 7.0)
            .yield_rate(AssetClass::Crypto, 10.0)
            .yield_rate(AssetClass::Metal, 3.0)
            .yield_rate(AssetClass::Cash, 2.5)
            .investment_goal(700.0)
            .strategy(Strategy::Smart)
            .build()?;

        Ok(Self::new(name, projection))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_sample_round_trips_through_yaml() {
        let sample = ScenarioFile::sample("Household").unwrap();
        let yaml = sample.to_yaml().unwrap();
        let back = ScenarioFile::from_yaml(&yaml).unwrap();
        assert_eq!(back, sample);
    }

    #[test]
    fn test_hand_written_yaml() {
        let yaml = r#"
name: Minimal
asOf: 2026-10-19
projection:
  horizonMonths: 24
  investmentGoal: "300"
  strategy: dca
  budget:
    incomeCategories:
      - id: salary
        name: Salary
    values:
      salary: 2500
  assets:
    - id: etf
      name: ETF
      type: stock
      value: 1000
    - id: house
      type: real estate
      value: 200000
  targets:
    stock: 100
"#;
        let scenario = ScenarioFile::from_yaml(yaml).unwrap();
        assert_eq!(scenario.name, "Minimal");
        assert_eq!(scenario.reference_date(date(2030, 1, 1)), date(2026, 10, 19));
        let p = &scenario.projection;
        assert_eq!(p.horizon_months, 24);
        assert_eq!(p.investment_goal, 300.0);
        assert_eq!(p.strategy, Strategy::Dca);
        assert_eq!(p.budget.monthly_income(), 2_500.0);
        assert_eq!(p.assets[1].class, AssetClass::RealEstate);
        assert_eq!(p.targets[AssetClass::Stock], 100.0);
        assert!(p.debts.is_empty());
    }

    #[test]
    fn test_reference_date_defaults_to_today() {
        let scenario = ScenarioFile::new("x", ProjectionConfig::default());
        assert_eq!(scenario.reference_date(date(2026, 10, 19)), date(2026, 10, 19));
    }
}
