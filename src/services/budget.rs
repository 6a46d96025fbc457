//! Budget evaluation
//!
//! Compares per-category monthly budgets with what was actually spent.

use std::collections::{BTreeMap, HashMap};

use crate::models::{Expense, Money};

/// Budget position of one category for one month
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus {
    /// Category the budget was set for
    pub category: String,
    /// Monthly budget amount
    pub budget: Money,
    /// Sum of the month's expenses in this category
    pub spent: Money,
    /// Budget minus spent (negative when over budget)
    pub remaining: Money,
    /// Spent as a percentage of the budget; zero when the budget is zero
    pub percentage: f64,
}

impl BudgetStatus {
    pub fn is_over_budget(&self) -> bool {
        self.remaining.is_negative()
    }
}

/// Evaluate every budgeted category against a month's expenses
///
/// One entry per budget, in category-name order, whether or not anything was
/// spent in it.
pub fn evaluate<'a>(
    budgets: &BTreeMap<String, Money>,
    month_expenses: impl IntoIterator<Item = &'a Expense>,
) -> Vec<BudgetStatus> {
    let mut spent_by_category: HashMap<&str, Money> = HashMap::new();
    for exp in month_expenses {
        *spent_by_category.entry(exp.category()).or_default() += exp.amount();
    }

    budgets
        .iter()
        .map(|(category, &budget)| {
            let spent = spent_by_category
                .get(category.as_str())
                .copied()
                .unwrap_or_default();
            let percentage = if budget.is_positive() {
                spent.percent_of(budget)
            } else {
                0.0
            };

            BudgetStatus {
                category: category.clone(),
                budget,
                spent,
                remaining: budget - spent,
                percentage,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategorySet;

    fn expense(date: &str, amount: &str, category: &str) -> Expense {
        Expense::parse(date, amount, category, "", &CategorySet::default()).unwrap()
    }

    #[test]
    fn test_evaluate_spent_and_remaining() {
        let mut budgets = BTreeMap::new();
        budgets.insert("Food & Dining".to_string(), Money::from_cents(20000));

        let expenses = vec![
            expense("2024-01-05", "50", "Food & Dining"),
            expense("2024-01-06", "25", "Food & Dining"),
            expense("2024-01-07", "99", "Travel"),
        ];

        let status = evaluate(&budgets, &expenses);
        assert_eq!(status.len(), 1);
        assert_eq!(status[0].spent, Money::from_cents(7500));
        assert_eq!(status[0].remaining, Money::from_cents(12500));
        assert_eq!(status[0].percentage, 37.5);
        assert!(!status[0].is_over_budget());
    }

    #[test]
    fn test_budget_without_spending() {
        let mut budgets = BTreeMap::new();
        budgets.insert("Travel".to_string(), Money::from_cents(10000));

        let status = evaluate(&budgets, &Vec::<Expense>::new());
        assert_eq!(status[0].spent, Money::zero());
        assert_eq!(status[0].remaining, Money::from_cents(10000));
        assert_eq!(status[0].percentage, 0.0);
    }

    #[test]
    fn test_zero_budget_has_zero_percentage() {
        let mut budgets = BTreeMap::new();
        budgets.insert("Other".to_string(), Money::zero());

        let expenses = vec![expense("2024-01-05", "40", "Other")];
        let status = evaluate(&budgets, &expenses);

        assert_eq!(status[0].percentage, 0.0);
        assert_eq!(status[0].remaining, Money::from_cents(-4000));
        assert!(status[0].is_over_budget());
    }

    #[test]
    fn test_extreme_budget_does_not_overflow() {
        let mut budgets = BTreeMap::new();
        budgets.insert("Other".to_string(), Money::from_cents(i64::MIN + 1));

        let expenses = vec![
            expense("2024-01-05", "1000000000", "Other"),
            expense("2024-01-06", "1000000000", "Other"),
        ];
        let status = evaluate(&budgets, &expenses);

        assert_eq!(status[0].spent, Money::from_cents(2 * Money::MAX.cents()));
        assert_eq!(status[0].remaining, Money::from_cents(i64::MIN));
    }
}
