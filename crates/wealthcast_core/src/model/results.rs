//! Projection results
//!
//! Everything the presentation layer needs to draw the wealth chart and the
//! summary cards. Plain data only.

use std::fmt;

use jiff::civil::Date;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::classes::ClassValues;

/// "Did this plan have to dip into savings?"
///
/// Variants are ordered by severity, so merging two flags is `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum SavingsWarning {
    #[default]
    None,
    /// A one-off event pushed the month below its investment goal
    Event,
    /// Income covers fixed costs but not the full investment goal
    StructuralInvestment,
    /// Income does not cover fixed costs and debt service
    StructuralDeficit,
}

impl SavingsWarning {
    /// Upgrade-only merge: the result is never less severe than `self`.
    #[must_use]
    pub fn merge(self, candidate: SavingsWarning) -> SavingsWarning {
        self.max(candidate)
    }

    pub fn is_warning(self) -> bool {
        self != SavingsWarning::None
    }

    pub fn tag(self) -> Option<&'static str> {
        match self {
            SavingsWarning::None => None,
            SavingsWarning::Event => Some("event"),
            SavingsWarning::StructuralInvestment => Some("structural_investment"),
            SavingsWarning::StructuralDeficit => Some("structural_deficit"),
        }
    }
}

impl fmt::Display for SavingsWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag().unwrap_or("none"))
    }
}

// Wire format is `false | "event" | "structural_investment" | "structural_deficit"`
impl Serialize for SavingsWarning {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.tag() {
            Some(tag) => serializer.serialize_str(tag),
            None => serializer.serialize_bool(false),
        }
    }
}

impl<'de> Deserialize<'de> for SavingsWarning {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct WarningVisitor;

        impl Visitor<'_> for WarningVisitor {
            type Value = SavingsWarning;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("false or a savings warning tag")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                if v {
                    Err(E::invalid_value(de::Unexpected::Bool(true), &self))
                } else {
                    Ok(SavingsWarning::None)
                }
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(SavingsWarning::None)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                match v {
                    "none" => Ok(SavingsWarning::None),
                    "event" => Ok(SavingsWarning::Event),
                    "structural_investment" => Ok(SavingsWarning::StructuralInvestment),
                    "structural_deficit" => Ok(SavingsWarning::StructuralDeficit),
                    other => Err(E::unknown_variant(
                        other,
                        &["event", "structural_investment", "structural_deficit"],
                    )),
                }
            }
        }

        deserializer.deserialize_any(WarningVisitor)
    }
}

/// One row of the projection, one per simulated month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
    /// Month offset from now (0 = current snapshot)
    pub month: usize,
    /// First day of the month
    pub date: Date,
    pub month_label: String,
    pub assets: f64,
    pub debt: f64,
    pub net_worth: f64,
    pub unrealized_gain: f64,
    /// Income - expenses - debt payments + events
    pub cash_flow: f64,
    pub events_impact: f64,
    pub debt_payments: f64,
    /// Amount moved from cash into asset classes this month
    pub invested: f64,
    pub buckets: ClassValues,
}

/// Headline numbers for the dashboard cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionStats {
    pub net_worth: f64,
    pub total_assets: f64,
    pub total_debt: f64,
    /// Interest still to be paid over the life of all debts
    pub total_interest: f64,
    pub monthly_surplus: f64,
    /// Surplus as a percentage of income
    pub savings_rate: f64,
    pub final_buckets: ClassValues,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub savings_used: SavingsWarning,
}

/// Complete output of one projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub series: Vec<ProjectionPoint>,
    pub stats: ProjectionStats,
}

impl Projection {
    pub fn horizon_months(&self) -> usize {
        self.series.len().saturating_sub(1)
    }

    pub fn final_point(&self) -> Option<&ProjectionPoint> {
        self.series.last()
    }

    pub fn final_net_worth(&self) -> f64 {
        self.final_point().map(|p| p.net_worth).unwrap_or(0.0)
    }

    pub fn total_invested(&self) -> f64 {
        self.series.iter().map(|p| p.invested).sum()
    }

    pub fn total_events_impact(&self) -> f64 {
        self.series.iter().map(|p| p.events_impact).sum()
    }
}
