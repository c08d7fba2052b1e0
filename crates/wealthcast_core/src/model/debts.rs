//! Amortizing debts (mortgages, consumer loans)

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::ids::DebtId;
use super::lenient::{self, finite_or_zero};
use crate::amortization;

/// An amortizing loan with a fixed monthly payment
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    #[serde(default)]
    pub id: DebtId,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub monthly_payment: f64,
    /// Monthly borrower insurance paid alongside the loan
    #[serde(default, deserialize_with = "lenient::number")]
    pub insurance: f64,
    /// Annual interest rate, in percent
    #[serde(default, deserialize_with = "lenient::number")]
    pub rate: f64,
    #[serde(default, deserialize_with = "lenient::date")]
    pub end_date: Option<Date>,
}

impl Debt {
    /// Payment plus insurance.
    pub fn monthly_cost(&self) -> f64 {
        finite_or_zero(self.monthly_payment) + finite_or_zero(self.insurance)
    }

    pub fn remaining_months(&self, now: Date) -> u32 {
        amortization::remaining_months(self.end_date, now)
    }

    /// Outstanding principal as of `now`.
    pub fn principal(&self, now: Date) -> f64 {
        amortization::principal(self.monthly_payment, self.rate, self.remaining_months(now))
    }
}
