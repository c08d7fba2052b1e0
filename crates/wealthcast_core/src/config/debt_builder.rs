//! Debt Builder DSL
//!
//! ```ignore
//! use wealthcast_core::config::DebtBuilder;
//!
//! let mortgage = DebtBuilder::new("Mortgage")
//!     .payment(1_150.0)
//!     .insurance(35.0)
//!     .rate(1.6)
//!     .ends(2041, 3, 5);
//! ```

use jiff::civil::Date;

use crate::error::{ConfigError, Result};
use crate::model::{Debt, DebtId};

/// Builder for an amortizing loan
#[derive(Debug, Clone)]
pub struct DebtBuilder {
    pub(crate) id: Option<String>,
    pub(crate) name: String,
    pub(crate) monthly_payment: f64,
    pub(crate) insurance: f64,
    pub(crate) rate: f64,
    pub(crate) end: Option<(i16, i8, i8)>,
}

impl DebtBuilder {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            monthly_payment: 0.0,
            insurance: 0.0,
            rate: 0.0,
            end: None,
        }
    }

    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Monthly loan payment, excluding insurance
    #[must_use]
    pub fn payment(mut self, monthly_payment: f64) -> Self {
        self.monthly_payment = monthly_payment;
        self
    }

    #[must_use]
    pub fn insurance(mut self, insurance: f64) -> Self {
        self.insurance = insurance;
        self
    }

    /// Annual interest rate in percent
    #[must_use]
    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    /// Date of the final payment
    #[must_use]
    pub fn ends(mut self, year: i16, month: i8, day: i8) -> Self {
        self.end = Some((year, month, day));
        self
    }

    pub(crate) fn build(self, fallback_id: DebtId) -> Result<Debt> {
        let end_date = self
            .end
            .map(|(year, month, day)| {
                Date::new(year, month, day).map_err(|source| ConfigError::InvalidDate {
                    entity: self.name.clone(),
                    year,
                    month,
                    day,
                    source,
                })
            })
            .transpose()?;

        Ok(Debt {
            id: self.id.map(DebtId::new).unwrap_or(fallback_id),
            name: self.name,
            monthly_payment: self.monthly_payment,
            insurance: self.insurance,
            rate: self.rate,
            end_date,
        })
    }
}
