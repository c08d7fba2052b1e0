//! Event Builder DSL
//!
//! Amounts are given as positive numbers; [`EventBuilder::income`] and
//! [`EventBuilder::expense`] decide the sign.
//!
//! ```ignore
//! use wealthcast_core::config::EventBuilder;
//!
//! // Yearly bonus every March
//! let bonus = EventBuilder::income("Bonus").amount(3_000.0).on(2027, 3, 15).yearly();
//!
//! // Quarterly insurance bill until end of 2030
//! let insurance = EventBuilder::expense("Insurance")
//!     .amount(240.0)
//!     .on(2026, 11, 1)
//!     .every_months(3)
//!     .until(2030, 12, 31);
//! ```

use jiff::civil::Date;

use crate::error::{ConfigError, Result};
use crate::model::{CashEvent, EventId, Recurrence};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Income,
    Expense,
}

/// Builder for a one-off or recurring cash event
#[derive(Debug, Clone)]
pub struct EventBuilder {
    pub(crate) id: Option<String>,
    pub(crate) name: String,
    pub(crate) direction: Direction,
    pub(crate) amount: f64,
    pub(crate) date: Option<(i16, i8, i8)>,
    pub(crate) recurrence: Recurrence,
    pub(crate) interval: Option<u32>,
    pub(crate) end: Option<(i16, i8, i8)>,
}

impl EventBuilder {
    fn new(name: impl Into<String>, direction: Direction) -> Self {
        Self {
            id: None,
            name: name.into(),
            direction,
            amount: 0.0,
            date: None,
            recurrence: Recurrence::None,
            interval: None,
            end: None,
        }
    }

    /// Money coming in
    #[must_use]
    pub fn income(name: impl Into<String>) -> Self {
        Self::new(name, Direction::Income)
    }

    /// Money going out
    #[must_use]
    pub fn expense(name: impl Into<String>) -> Self {
        Self::new(name, Direction::Expense)
    }

    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Magnitude of each occurrence
    #[must_use]
    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = amount.abs();
        self
    }

    /// Date of the first occurrence
    #[must_use]
    pub fn on(mut self, year: i16, month: i8, day: i8) -> Self {
        self.date = Some((year, month, day));
        self
    }

    // =========================================================================
    // Recurrence
    // =========================================================================

    #[must_use]
    pub fn once(mut self) -> Self {
        self.recurrence = Recurrence::None;
        self
    }

    #[must_use]
    pub fn weekly(mut self) -> Self {
        self.recurrence = Recurrence::Weekly;
        self
    }

    #[must_use]
    pub fn monthly(mut self) -> Self {
        self.recurrence = Recurrence::Monthly;
        self
    }

    #[must_use]
    pub fn yearly(mut self) -> Self {
        self.recurrence = Recurrence::Yearly;
        self
    }

    /// Every `months` months, starting from the first occurrence
    #[must_use]
    pub fn every_months(mut self, months: u32) -> Self {
        self.recurrence = Recurrence::Custom;
        self.interval = Some(months);
        self
    }

    /// Last date an occurrence may fall on
    #[must_use]
    pub fn until(mut self, year: i16, month: i8, day: i8) -> Self {
        self.end = Some((year, month, day));
        self
    }

    pub(crate) fn build(self, fallback_id: EventId) -> Result<CashEvent> {
        let date = self.resolve(self.date)?;
        let end_date = self.resolve(self.end)?;
        let amount = match self.direction {
            Direction::Income => self.amount,
            Direction::Expense => -self.amount,
        };

        Ok(CashEvent {
            id: self.id.map(EventId::new).unwrap_or(fallback_id),
            name: self.name,
            amount,
            date,
            recurrence: self.recurrence,
            interval: self.interval,
            end_date,
        })
    }

    fn resolve(&self, ymd: Option<(i16, i8, i8)>) -> Result<Option<Date>> {
        ymd.map(|(year, month, day)| {
            Date::new(year, month, day).map_err(|source| ConfigError::InvalidDate {
                entity: self.name.clone(),
                year,
                month,
                day,
                source,
            })
        })
        .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_expense_is_negative() {
        let event = EventBuilder::expense("Car")
            .amount(5_000.0)
            .on(2027, 4, 10)
            .build(EventId::new("event-1"))
            .unwrap();
        assert_eq!(event.amount, -5_000.0);
        assert_eq!(event.date, Some(date(2027, 4, 10)));
        assert_eq!(event.recurrence, Recurrence::None);
    }

    #[test]
    fn test_sign_comes_from_direction_only() {
        let event = EventBuilder::income("Refund")
            .amount(-80.0)
            .build(EventId::new("event-1"))
            .unwrap();
        assert_eq!(event.amount, 80.0);
    }

    #[test]
    fn test_custom_interval() {
        let event = EventBuilder::expense("Insurance")
            .amount(240.0)
            .on(2026, 11, 1)
            .every_months(3)
            .until(2030, 12, 31)
            .build(EventId::new("event-1"))
            .unwrap();
        assert_eq!(event.recurrence, Recurrence::Custom);
        assert_eq!(event.interval_months(), 3);
        assert_eq!(event.end_date, Some(date(2030, 12, 31)));
    }

    #[test]
    fn test_invalid_date() {
        let err = EventBuilder::income("Bonus")
            .on(2027, 2, 30)
            .build(EventId::new("event-1"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDate { day: 30, .. }));
    }
}
