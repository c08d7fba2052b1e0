//! Command-line front end for the wealthcast projection engine
//!
//! Scenarios live as YAML files in a data directory (`~/.wealthcast/` by
//! default). Commands load a scenario, run the engine and render plain text
//! or JSON.

// ============================================================================
// Front-end modules
// ============================================================================

pub mod commands;
pub mod data;
pub mod logging;
pub mod report;
pub mod util;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use data::{DataDirectory, ScenarioFile, StorageError};
pub use logging::init_logging;
