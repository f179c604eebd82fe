use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::domain::kinds::{Category, GoalCategory, Period, Priority};

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: String,
    pub category: Category,
    pub is_income: bool,
    pub is_recurring: bool,
    pub recurrence: Option<Period>,
}

/// A transaction as submitted by the user, before an id is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: String,
    pub category: Category,
    pub is_income: bool,
    pub recurrence: Option<Period>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub category: Category,
    pub limit: Decimal,
    pub period: Period,
    pub start_date: NaiveDate,
    pub is_active: bool,
    /// Cache only. Overwritten by every recomputation from transactions.
    pub current_spent: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    pub category: Category,
    pub limit: Decimal,
    pub period: Period,
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SavingsGoal {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub deadline: Option<NaiveDate>,
    pub category: GoalCategory,
    pub priority: Priority,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSavingsGoal {
    pub name: String,
    pub target_amount: Decimal,
    pub deadline: Option<NaiveDate>,
    pub category: GoalCategory,
    pub priority: Priority,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AiTip {
    pub id: String,
    pub user_id: String,
    pub content: String,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub is_read: bool,
    pub relevance_score: Option<f64>,
}
