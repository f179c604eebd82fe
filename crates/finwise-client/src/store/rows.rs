//! Typed mirrors of the ledger tables. Every nullable column is an `Option`
//! and only becomes a domain value through `TryFrom`, which fills the
//! backend defaults and rejects spellings or numbers it cannot interpret.

use std::str::FromStr;

use rusqlite::Row;
use rust_decimal::Decimal;

use crate::domain::date::{parse_iso_date, parse_timestamp};
use crate::domain::{
    AiTip, Budget, Category, GoalCategory, Period, Priority, SavingsGoal, Transaction,
};

/// A stored value that has no domain meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredValueError {
    pub table: &'static str,
    pub column: &'static str,
    pub value: String,
}

impl StoredValueError {
    fn new(table: &'static str, column: &'static str, value: &str) -> Self {
        Self {
            table,
            column,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub id: String,
    pub user_id: String,
    pub amount: String,
    pub date: String,
    pub description: String,
    pub category: String,
    pub is_income: Option<bool>,
    pub is_recurring: Option<bool>,
    pub recurrence: Option<String>,
}

impl TransactionRow {
    pub const COLUMNS: &'static str =
        "id, user_id, amount, date, description, category, is_income, is_recurring, recurrence";

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            amount: row.get(2)?,
            date: row.get(3)?,
            description: row.get(4)?,
            category: row.get(5)?,
            is_income: row.get(6)?,
            is_recurring: row.get(7)?,
            recurrence: row.get(8)?,
        })
    }
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = StoredValueError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        const TABLE: &str = "transactions";
        let recurrence = match row.recurrence.as_deref() {
            None => None,
            Some(value) => Some(parse_enum(TABLE, "recurrence", value, Period::parse)?),
        };
        Ok(Self {
            amount: parse_decimal(TABLE, "amount", &row.amount)?,
            date: parse_date(TABLE, "date", &row.date)?,
            category: parse_enum(TABLE, "category", &row.category, Category::parse)?,
            is_income: row.is_income.unwrap_or(false),
            is_recurring: row.is_recurring.unwrap_or(false),
            recurrence,
            id: row.id,
            user_id: row.user_id,
            description: row.description,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetRow {
    pub id: String,
    pub user_id: String,
    pub category: String,
    pub limit_amount: String,
    pub period: Option<String>,
    pub start_date: String,
    pub is_active: Option<bool>,
    pub current_spent: Option<String>,
}

impl BudgetRow {
    pub const COLUMNS: &'static str =
        "id, user_id, category, limit_amount, period, start_date, is_active, current_spent";

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            category: row.get(2)?,
            limit_amount: row.get(3)?,
            period: row.get(4)?,
            start_date: row.get(5)?,
            is_active: row.get(6)?,
            current_spent: row.get(7)?,
        })
    }
}

impl TryFrom<BudgetRow> for Budget {
    type Error = StoredValueError;

    fn try_from(row: BudgetRow) -> Result<Self, Self::Error> {
        const TABLE: &str = "budgets";
        let period = match row.period.as_deref() {
            None => Period::Monthly,
            Some(value) => parse_enum(TABLE, "period", value, Period::parse)?,
        };
        let current_spent = match row.current_spent.as_deref() {
            None => Decimal::ZERO,
            Some(value) => parse_decimal(TABLE, "current_spent", value)?,
        };
        Ok(Self {
            category: parse_enum(TABLE, "category", &row.category, Category::parse)?,
            limit: parse_decimal(TABLE, "limit_amount", &row.limit_amount)?,
            period,
            start_date: parse_date(TABLE, "start_date", &row.start_date)?,
            is_active: row.is_active.unwrap_or(true),
            current_spent,
            id: row.id,
            user_id: row.user_id,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SavingsGoalRow {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub target_amount: String,
    pub current_amount: Option<String>,
    pub deadline: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub is_completed: Option<bool>,
    pub created_at: String,
    pub image_url: Option<String>,
}

impl SavingsGoalRow {
    pub const COLUMNS: &'static str = "id, user_id, name, target_amount, current_amount, deadline, \
         category, priority, is_completed, created_at, image_url";

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            name: row.get(2)?,
            target_amount: row.get(3)?,
            current_amount: row.get(4)?,
            deadline: row.get(5)?,
            category: row.get(6)?,
            priority: row.get(7)?,
            is_completed: row.get(8)?,
            created_at: row.get(9)?,
            image_url: row.get(10)?,
        })
    }
}

impl TryFrom<SavingsGoalRow> for SavingsGoal {
    type Error = StoredValueError;

    fn try_from(row: SavingsGoalRow) -> Result<Self, Self::Error> {
        const TABLE: &str = "savings_goals";
        let current_amount = match row.current_amount.as_deref() {
            None => Decimal::ZERO,
            Some(value) => parse_decimal(TABLE, "current_amount", value)?,
        };
        let deadline = match row.deadline.as_deref() {
            None => None,
            Some(value) => Some(parse_date(TABLE, "deadline", value)?),
        };
        let category = match row.category.as_deref() {
            None => GoalCategory::Other,
            Some(value) => parse_enum(TABLE, "category", value, GoalCategory::parse)?,
        };
        let priority = match row.priority.as_deref() {
            None => Priority::Medium,
            Some(value) => parse_enum(TABLE, "priority", value, Priority::parse)?,
        };
        let created_at = parse_timestamp(&row.created_at)
            .ok_or_else(|| StoredValueError::new(TABLE, "created_at", &row.created_at))?;
        let target_amount = parse_decimal(TABLE, "target_amount", &row.target_amount)?;
        // A reached target is completed whatever the flag says; a set flag
        // stays set because completion is terminal.
        let is_completed = row.is_completed.unwrap_or(false) || current_amount >= target_amount;
        Ok(Self {
            target_amount,
            current_amount,
            deadline,
            category,
            priority,
            is_completed,
            created_at,
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            image_url: row.image_url,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AiTipRow {
    pub id: String,
    pub user_id: String,
    pub content: String,
    pub category: Option<String>,
    pub created_at: String,
    pub is_read: Option<bool>,
    pub relevance_score: Option<f64>,
}

impl AiTipRow {
    pub const COLUMNS: &'static str =
        "id, user_id, content, category, created_at, is_read, relevance_score";

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            content: row.get(2)?,
            category: row.get(3)?,
            created_at: row.get(4)?,
            is_read: row.get(5)?,
            relevance_score: row.get(6)?,
        })
    }
}

impl TryFrom<AiTipRow> for AiTip {
    type Error = StoredValueError;

    fn try_from(row: AiTipRow) -> Result<Self, Self::Error> {
        let created_at = parse_timestamp(&row.created_at)
            .ok_or_else(|| StoredValueError::new("ai_tips", "created_at", &row.created_at))?;
        Ok(Self {
            created_at,
            is_read: row.is_read.unwrap_or(false),
            id: row.id,
            user_id: row.user_id,
            content: row.content,
            category: row.category,
            relevance_score: row.relevance_score,
        })
    }
}

fn parse_decimal(
    table: &'static str,
    column: &'static str,
    value: &str,
) -> Result<Decimal, StoredValueError> {
    Decimal::from_str(value).map_err(|_| StoredValueError::new(table, column, value))
}

fn parse_date(
    table: &'static str,
    column: &'static str,
    value: &str,
) -> Result<chrono::NaiveDate, StoredValueError> {
    parse_iso_date(value).ok_or_else(|| StoredValueError::new(table, column, value))
}

fn parse_enum<T>(
    table: &'static str,
    column: &'static str,
    value: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<T, StoredValueError> {
    parse(value).ok_or_else(|| StoredValueError::new(table, column, value))
}
