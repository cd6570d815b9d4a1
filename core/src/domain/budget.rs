//! Budget progress as shown on the budget cards

use shared::{Budget, Category};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetUsage {
    pub category: Category,
    /// `spent / limit`, or 0 for a non-positive limit
    pub ratio: f64,
    pub percent_used: u32,
    /// Fill fraction for the progress bar, capped at 1
    pub bar_fraction: f64,
    pub is_over_limit: bool,
}

impl From<&Budget> for BudgetUsage {
    fn from(budget: &Budget) -> Self {
        let ratio = if budget.limit > 0.0 {
            (budget.spent / budget.limit).max(0.0)
        } else {
            0.0
        };
        Self {
            category: budget.category,
            ratio,
            percent_used: (ratio * 100.0).round() as u32,
            bar_fraction: ratio.min(1.0),
            is_over_limit: budget.spent > budget.limit,
        }
    }
}

/// Budgets whose spending has passed the limit
pub fn over_limit(budgets: &[Budget]) -> Vec<Category> {
    budgets
        .iter()
        .filter(|b| BudgetUsage::from(*b).is_over_limit)
        .map(|b| b.category)
        .collect()
}
