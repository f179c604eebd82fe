use rust_decimal::Decimal;

use crate::domain::{Budget, Category, Transaction};

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryUsage {
    pub budget_id: String,
    pub category: Category,
    pub limit: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percent_used: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetSummary {
    pub total_budget: Decimal,
    pub total_spent: Decimal,
    /// Signed. Negative means the budgets are overspent in aggregate.
    pub remaining: Decimal,
    pub percent_used: Decimal,
    pub categories: Vec<CategoryUsage>,
}

/// Rebuilds every budget's `current_spent` from the full transaction set.
///
/// Each budget sums the non-income transactions in its own category, so two
/// budgets sharing a category both see the same spending. Transactions in a
/// category without a budget contribute nothing.
pub fn recompute_spent(transactions: &[Transaction], budgets: &[Budget]) -> Vec<Budget> {
    budgets
        .iter()
        .map(|budget| Budget {
            current_spent: category_total(transactions, budget.category),
            ..budget.clone()
        })
        .collect()
}

/// Sum of outflow amounts in one category.
pub fn category_total(transactions: &[Transaction], category: Category) -> Decimal {
    transactions
        .iter()
        .filter(|transaction| transaction.category == category && !transaction.is_income)
        .map(|transaction| transaction.amount)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

pub fn compute_budget_summary(transactions: &[Transaction], budgets: &[Budget]) -> BudgetSummary {
    let refreshed = recompute_spent(transactions, budgets);
    summarize_budgets(&refreshed)
}

/// Totals already-refreshed budgets. Callers must run [`recompute_spent`] first;
/// the stored `current_spent` is trusted as-is here.
pub fn summarize_budgets(budgets: &[Budget]) -> BudgetSummary {
    let total_budget = budgets
        .iter()
        .map(|budget| budget.limit)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    let total_spent = budgets
        .iter()
        .map(|budget| budget.current_spent)
        .fold(Decimal::ZERO, Decimal::saturating_add);

    let categories = budgets
        .iter()
        .map(|budget| CategoryUsage {
            budget_id: budget.id.clone(),
            category: budget.category,
            limit: budget.limit,
            spent: budget.current_spent,
            remaining: budget.limit.saturating_sub(budget.current_spent),
            percent_used: percent_of(budget.current_spent, budget.limit),
        })
        .collect::<Vec<CategoryUsage>>();

    log::debug!(
        "budget summary recomputed: budgets={} total_budget={total_budget} total_spent={total_spent}",
        budgets.len()
    );

    BudgetSummary {
        total_budget,
        total_spent,
        remaining: total_budget.saturating_sub(total_spent),
        percent_used: percent_of(total_spent, total_budget),
        categories,
    }
}

/// Saturates at `Decimal::MAX` when the ratio does not fit.
pub(crate) fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::MAX)
}
