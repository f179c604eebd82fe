//! Budget aggregation: recomputes spending per budget from the full
//! transaction set and derives totals, headroom and percent used.

pub mod cash_flow;
pub mod summary;

pub use cash_flow::{CashFlow, CategorySpending, compute_cash_flow};
pub use summary::{
    BudgetSummary, CategoryUsage, category_total, compute_budget_summary, recompute_spent,
    summarize_budgets,
};
