//! Closed-form loan math
//!
//! Outstanding principal is the present value of the remaining payments
//! (ordinary annuity). The projection recomputes it from the closed form at
//! each month's remaining term rather than walking a materialized schedule;
//! [`schedule`] exists for display only.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::date_math::{add_months, month_start, months_between};
use crate::model::lenient::finite_or_zero;
use crate::model::{Debt, DebtId};

/// Monthly periodic rate from an annual percentage.
#[inline]
pub fn monthly_rate(annual_rate_pct: f64) -> f64 {
    finite_or_zero(annual_rate_pct) / 100.0 / 12.0
}

/// Whole months from `now` until `end_date`, never negative.
///
/// A missing end date counts as already paid off.
pub fn remaining_months(end_date: Option<Date>, now: Date) -> u32 {
    end_date
        .map(|end| months_between(now, end).max(0) as u32)
        .unwrap_or(0)
}

/// Present value of `months` payments of `monthly_payment`.
///
/// With a 0% rate this is straight-line: `payment × months`.
pub fn principal(monthly_payment: f64, annual_rate_pct: f64, months: u32) -> f64 {
    if months == 0 {
        return 0.0;
    }
    let payment = finite_or_zero(monthly_payment);
    let r = monthly_rate(annual_rate_pct);
    if r == 0.0 {
        return payment * months as f64;
    }
    let pv = payment * (1.0 - (1.0 + r).powi(-(months as i32))) / r;
    finite_or_zero(pv)
}

/// Payment that amortizes `principal` to zero over `months` (inverse of [`principal`]).
pub fn annuity_payment(principal: f64, annual_rate_pct: f64, months: u32) -> f64 {
    if months == 0 {
        return 0.0;
    }
    let principal = finite_or_zero(principal);
    let r = monthly_rate(annual_rate_pct);
    if r == 0.0 {
        return principal / months as f64;
    }
    finite_or_zero(principal * r / (1.0 - (1.0 + r).powi(-(months as i32))))
}

/// Interest still due: total of remaining payments minus principal.
pub fn remaining_interest(monthly_payment: f64, annual_rate_pct: f64, months: u32) -> f64 {
    let paid = finite_or_zero(monthly_payment) * months as f64;
    (paid - principal(monthly_payment, annual_rate_pct, months)).max(0.0)
}

/// One month of an amortization table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based payment number
    pub month: u32,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    /// Balance after this payment, clamped at 0
    pub balance: f64,
}

/// Month-by-month amortization table with exactly `months` rows.
///
/// If `monthly_payment` overstates the true annuity payment the running
/// balance dips below zero; displayed balances are clamped at 0.
pub fn schedule(
    principal: f64,
    annual_rate_pct: f64,
    months: u32,
    monthly_payment: f64,
) -> Vec<AmortizationRow> {
    let r = monthly_rate(annual_rate_pct);
    let payment = finite_or_zero(monthly_payment);
    let mut balance = finite_or_zero(principal);

    (1..=months)
        .map(|month| {
            let interest = balance * r;
            let principal_paid = payment - interest;
            balance -= principal_paid;
            AmortizationRow {
                month,
                payment,
                interest,
                principal: principal_paid,
                balance: balance.max(0.0),
            }
        })
        .collect()
}

/// Per-debt overview for the debts view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtSummary {
    pub id: DebtId,
    pub name: String,
    pub remaining_months: u32,
    pub principal: f64,
    pub monthly_cost: f64,
    pub remaining_interest: f64,
    /// Month of the final payment, `None` when already paid off
    pub payoff_month: Option<Date>,
}

impl DebtSummary {
    pub fn for_debt(debt: &Debt, now: Date) -> Self {
        let months = debt.remaining_months(now);
        let payoff_month =
            (months > 0).then(|| add_months(month_start(now), months as i32 - 1));
        Self {
            id: debt.id.clone(),
            name: debt.name.clone(),
            remaining_months: months,
            principal: principal(debt.monthly_payment, debt.rate, months),
            monthly_cost: debt.monthly_cost(),
            remaining_interest: remaining_interest(debt.monthly_payment, debt.rate, months),
            payoff_month,
        }
    }

    /// Full table for this debt from `now` to payoff.
    pub fn schedule(&self, debt: &Debt) -> Vec<AmortizationRow> {
        schedule(
            self.principal,
            debt.rate,
            self.remaining_months,
            debt.monthly_payment,
        )
    }
}

pub fn summarize_debts(debts: &[Debt], now: Date) -> Vec<DebtSummary> {
    debts.iter().map(|d| DebtSummary::for_debt(d, now)).collect()
}
