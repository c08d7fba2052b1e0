//! Scenario persistence

pub mod scenario;
pub mod storage;

pub use scenario::ScenarioFile;
pub use storage::{DataDirectory, StorageError};
