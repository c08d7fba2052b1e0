//! Integration tests for the projection engine
//!
//! Tests are organized by topic:
//! - `scenarios` - Worked examples: debts, events, allocation, deficits
//! - `properties` - Invariants that hold for any input
//! - `warnings` - Savings warning classification and escalation
//! - `builder_dsl` - Builder DSL for fluent projection setup

mod properties;

use jiff::civil::{Date, date};

/// Reference date shared by the engine tests.
pub(crate) const NOW: Date = date(2026, 10, 19);
