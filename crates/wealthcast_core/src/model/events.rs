//! Cash events - one-off or recurring income and expenses
//!
//! Events sit outside the monthly budget: a bonus, a yearly insurance bill,
//! a car purchase. The amount is signed (positive = income).

use std::fmt;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::ids::EventId;
use super::lenient;

/// How often an event repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Recurrence {
    /// Happens once, in the month of its date
    #[default]
    None,
    Weekly,
    Monthly,
    Yearly,
    /// Every `interval` months
    Custom,
}

impl Recurrence {
    pub fn as_str(self) -> &'static str {
        match self {
            Recurrence::None => "none",
            Recurrence::Weekly => "weekly",
            Recurrence::Monthly => "monthly",
            Recurrence::Yearly => "yearly",
            Recurrence::Custom => "custom",
        }
    }

    /// Unknown tags are treated as one-off.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "weekly" => Recurrence::Weekly,
            "monthly" => Recurrence::Monthly,
            "yearly" | "annual" | "annually" => Recurrence::Yearly,
            "custom" => Recurrence::Custom,
            _ => Recurrence::None,
        }
    }
}

impl From<String> for Recurrence {
    fn from(tag: String) -> Self {
        Recurrence::from_tag(&tag)
    }
}

impl From<Recurrence> for &'static str {
    fn from(recurrence: Recurrence) -> Self {
        recurrence.as_str()
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dated cash event
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashEvent {
    #[serde(default)]
    pub id: EventId,
    #[serde(default)]
    pub name: String,
    /// Signed amount: positive is income, negative is an expense
    #[serde(default, deserialize_with = "lenient::number")]
    pub amount: f64,
    /// First occurrence. Events without a usable date never fire.
    #[serde(default, deserialize_with = "lenient::date")]
    pub date: Option<Date>,
    #[serde(default)]
    pub recurrence: Recurrence,
    /// Months between occurrences for [`Recurrence::Custom`]
    #[serde(default, deserialize_with = "lenient::optional_count")]
    pub interval: Option<u32>,
    /// Last date an occurrence may fall on (inclusive)
    #[serde(default, deserialize_with = "lenient::date")]
    pub end_date: Option<Date>,
}

impl CashEvent {
    /// Custom interval in months, never below 1.
    pub fn interval_months(&self) -> u32 {
        self.interval.unwrap_or(1).max(1)
    }
}
