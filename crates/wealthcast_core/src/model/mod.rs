mod assets;
mod budget;
mod classes;
mod debts;
mod events;
mod ids;
pub mod lenient;
mod results;
mod strategy;

pub use assets::{Asset, class_basis, class_values};
pub use budget::{BudgetCategory, BudgetSnapshot};
pub use classes::{AssetClass, ClassValues};
pub use debts::Debt;
pub use events::{CashEvent, Recurrence};
pub use ids::{AssetId, DebtId, EventId};
pub use results::{Projection, ProjectionPoint, ProjectionStats, SavingsWarning};
pub use strategy::{Strategy, UnknownStrategy};
