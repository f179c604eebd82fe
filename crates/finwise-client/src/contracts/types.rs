use rust_decimal::Decimal;
use serde::Serialize;

use crate::budget::{BudgetSummary, CashFlow, CategorySpending, CategoryUsage};
use crate::domain::date::{format_iso_date, format_timestamp};
use crate::domain::{AiTip, Budget, SavingsGoal, Transaction};
use crate::goals::{GoalUpdate, goal_progress};

#[derive(Debug, Clone, Serialize)]
pub struct TransactionView {
    pub id: String,
    pub amount: Decimal,
    pub date: String,
    pub description: String,
    pub category: String,
    pub is_income: bool,
    pub is_recurring: bool,
    pub recurrence: Option<String>,
}

impl From<&Transaction> for TransactionView {
    fn from(transaction: &Transaction) -> Self {
        Self {
            id: transaction.id.clone(),
            amount: transaction.amount,
            date: format_iso_date(&transaction.date),
            description: transaction.description.clone(),
            category: transaction.category.as_str().to_string(),
            is_income: transaction.is_income,
            is_recurring: transaction.is_recurring,
            recurrence: transaction
                .recurrence
                .map(|period| period.as_str().to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionAddData {
    pub transaction: TransactionView,
    pub summary: SummaryView,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionListData {
    pub total: usize,
    pub returned: usize,
    pub rows: Vec<TransactionView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetView {
    pub id: String,
    pub category: String,
    pub limit: Decimal,
    pub period: String,
    pub start_date: String,
    pub is_active: bool,
    pub current_spent: Decimal,
}

impl From<&Budget> for BudgetView {
    fn from(budget: &Budget) -> Self {
        Self {
            id: budget.id.clone(),
            category: budget.category.as_str().to_string(),
            limit: budget.limit,
            period: budget.period.as_str().to_string(),
            start_date: format_iso_date(&budget.start_date),
            is_active: budget.is_active,
            current_spent: budget.current_spent,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetCreateData {
    pub budget: BudgetView,
    pub summary: SummaryView,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetListData {
    pub rows: Vec<BudgetView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryUsageView {
    pub budget_id: String,
    pub category: String,
    pub limit: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percent_used: Decimal,
}

impl From<&CategoryUsage> for CategoryUsageView {
    fn from(usage: &CategoryUsage) -> Self {
        Self {
            budget_id: usage.budget_id.clone(),
            category: usage.category.as_str().to_string(),
            limit: usage.limit,
            spent: usage.spent,
            remaining: usage.remaining,
            percent_used: usage.percent_used.round_dp(2),
        }
    }
}

/// Summary as reported to callers. Percentages are rounded to two places;
/// money values are exact.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryView {
    pub total_budget: Decimal,
    pub total_spent: Decimal,
    pub remaining: Decimal,
    pub percent_used: Decimal,
    pub categories: Vec<CategoryUsageView>,
}

impl From<&BudgetSummary> for SummaryView {
    fn from(summary: &BudgetSummary) -> Self {
        Self {
            total_budget: summary.total_budget,
            total_spent: summary.total_spent,
            remaining: summary.remaining,
            percent_used: summary.percent_used.round_dp(2),
            categories: summary
                .categories
                .iter()
                .map(CategoryUsageView::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySpendingView {
    pub category: String,
    pub spent: Decimal,
}

impl From<&CategorySpending> for CategorySpendingView {
    fn from(entry: &CategorySpending) -> Self {
        Self {
            category: entry.category.as_str().to_string(),
            spent: entry.spent,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CashFlowView {
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
    pub spending_by_category: Vec<CategorySpendingView>,
}

impl From<&CashFlow> for CashFlowView {
    fn from(cash_flow: &CashFlow) -> Self {
        Self {
            income: cash_flow.income,
            expenses: cash_flow.expenses,
            net: cash_flow.net,
            spending_by_category: cash_flow
                .spending_by_category
                .iter()
                .map(CategorySpendingView::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetSummaryData {
    pub summary: SummaryView,
    pub cash_flow: CashFlowView,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalView {
    pub id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub deadline: Option<String>,
    pub category: String,
    pub priority: String,
    pub is_completed: bool,
    pub created_at: String,
    pub image_url: Option<String>,
    pub progress_percent: Decimal,
    pub remaining_amount: Decimal,
}

impl From<&SavingsGoal> for GoalView {
    fn from(goal: &SavingsGoal) -> Self {
        let progress = goal_progress(goal);
        Self {
            id: goal.id.clone(),
            name: goal.name.clone(),
            target_amount: goal.target_amount,
            current_amount: goal.current_amount,
            deadline: goal.deadline.as_ref().map(format_iso_date),
            category: goal.category.as_str().to_string(),
            priority: goal.priority.as_str().to_string(),
            is_completed: goal.is_completed,
            created_at: format_timestamp(&goal.created_at),
            image_url: goal.image_url.clone(),
            progress_percent: progress.percent.round_dp(2),
            remaining_amount: progress.remaining,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalListData {
    pub rows: Vec<GoalView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalCreateData {
    pub goal: GoalView,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalUpdateData {
    /// `contribute` or `set`.
    pub mode: String,
    pub amount: Decimal,
    pub goal: GoalView,
    pub just_completed: bool,
}

impl GoalUpdateData {
    pub fn new(mode: &str, amount: Decimal, update: &GoalUpdate) -> Self {
        Self {
            mode: mode.to_string(),
            amount,
            goal: GoalView::from(&update.goal),
            just_completed: update.just_completed,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TipView {
    pub id: String,
    pub content: String,
    pub category: Option<String>,
    pub created_at: String,
    pub is_read: bool,
    pub relevance_score: Option<f64>,
}

impl From<&AiTip> for TipView {
    fn from(tip: &AiTip) -> Self {
        Self {
            id: tip.id.clone(),
            content: tip.content.clone(),
            category: tip.category.clone(),
            created_at: format_timestamp(&tip.created_at),
            is_read: tip.is_read,
            relevance_score: tip.relevance_score,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TipListData {
    pub unread_only: bool,
    pub rows: Vec<TipView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TipReadData {
    pub tip: TipView,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverviewData {
    pub user_id: String,
    pub summary: SummaryView,
    pub cash_flow: CashFlowView,
    pub recent_transactions: Vec<TransactionView>,
    pub goals: Vec<GoalView>,
    pub unread_tips: Vec<TipView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DemoSeedData {
    pub user_id: String,
    pub message: String,
    pub transactions: usize,
    pub budgets: usize,
    pub goals: usize,
    pub tips: usize,
    pub summary: SummaryView,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportData {
    pub dry_run: bool,
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import_id: Option<String>,
    pub message: String,
    pub source_kind: String,
    pub summary: ImportSummary,
    pub issues: Vec<ImportIssue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_summary: Option<SummaryView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub rows_read: i64,
    pub rows_valid: i64,
    pub rows_invalid: i64,
    pub inserted: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportIssue {
    pub row: i64,
    pub field: String,
    pub code: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
}
