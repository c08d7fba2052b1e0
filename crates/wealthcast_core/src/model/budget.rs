//! Monthly budget snapshot

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::lenient::{self, finite_or_zero};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl BudgetCategory {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The user's recurring monthly income and expenses
///
/// Category lists define which entries count as income or expense; `values`
/// holds the monthly amount per category id. Missing values count as `0`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSnapshot {
    #[serde(default)]
    pub income_categories: Vec<BudgetCategory>,
    #[serde(default)]
    pub expense_categories: Vec<BudgetCategory>,
    #[serde(default, deserialize_with = "lenient::number_map")]
    pub values: FxHashMap<String, f64>,
}

impl BudgetSnapshot {
    pub fn value(&self, category_id: &str) -> f64 {
        self.values
            .get(category_id)
            .copied()
            .map(finite_or_zero)
            .unwrap_or(0.0)
    }

    pub fn monthly_income(&self) -> f64 {
        self.income_categories.iter().map(|c| self.value(&c.id)).sum()
    }

    pub fn monthly_expenses(&self) -> f64 {
        self.expense_categories.iter().map(|c| self.value(&c.id)).sum()
    }

    /// Add an income line.
    pub fn add_income(&mut self, category: BudgetCategory, amount: f64) {
        self.values.insert(category.id.clone(), amount);
        self.income_categories.push(category);
    }

    /// Add an expense line.
    pub fn add_expense(&mut self, category: BudgetCategory, amount: f64) {
        self.values.insert(category.id.clone(), amount);
        self.expense_categories.push(category);
    }
}
