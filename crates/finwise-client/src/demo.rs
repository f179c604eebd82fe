//! Sample household used by `finwise demo seed`: one month of rent,
//! groceries and salary, two budgets, two goals and one tip.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{TransactionBehavior, params};
use rust_decimal::Decimal;

use crate::domain::date::{format_iso_date, parse_timestamp};
use crate::domain::{
    AiTip, Category, GoalCategory, NewTransaction, Period, Priority, SavingsGoal,
};
use crate::session::FinanceSession;
use crate::state::map_sqlite_error;
use crate::store::{self, new_id, now_timestamp};
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, PartialEq)]
pub struct DemoSeedCounts {
    pub transactions: usize,
    pub budgets: usize,
    pub goals: usize,
    pub tips: usize,
}

struct DemoBudget {
    category: Category,
    limit: i64,
    /// Deliberately stale; the first recomputation corrects it.
    cached_spent: i64,
}

/// Writes the sample household for the session's user in one transaction and
/// returns the reloaded session. Refuses when the user already owns data.
pub fn seed(mut session: FinanceSession) -> ClientResult<(FinanceSession, DemoSeedCounts)> {
    let user_id = session.user_id().to_string();
    let db_path = session.db_path().to_path_buf();

    let transactions = demo_transactions()?;
    let budgets = demo_budgets();
    let goals = demo_goals(&user_id)?;
    let tips = demo_tips(&user_id)?;
    let budget_start = demo_date(2023, 4, 1)?;

    {
        let connection = session.connection_mut();
        let tx = connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|error| map_sqlite_error(&db_path, &error))?;

        if store::user_has_data(&tx, &db_path, &user_id)? {
            return Err(ClientError::demo_already_seeded(&user_id));
        }

        for new in &transactions {
            tx.execute(
                "INSERT INTO transactions (
                    id, user_id, amount, date, description, category,
                    is_income, is_recurring, recurrence, import_id, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, NULL, ?10)",
                params![
                    new_id("txn"),
                    user_id,
                    new.amount.to_string(),
                    format_iso_date(&new.date),
                    new.description,
                    new.category.as_str(),
                    new.is_income,
                    new.recurrence.is_some(),
                    new.recurrence.map(Period::as_str),
                    now_timestamp(),
                ],
            )
            .map_err(|error| map_sqlite_error(&db_path, &error))?;
        }

        for budget in &budgets {
            tx.execute(
                "INSERT INTO budgets (
                    id, user_id, category, limit_amount, period, start_date,
                    is_active, current_spent, created_at
                ) VALUES (?1, ?2, ?3, ?4, 'monthly', ?5, 1, ?6, ?7)",
                params![
                    new_id("bud"),
                    user_id,
                    budget.category.as_str(),
                    budget.limit.to_string(),
                    format_iso_date(&budget_start),
                    budget.cached_spent.to_string(),
                    now_timestamp(),
                ],
            )
            .map_err(|error| map_sqlite_error(&db_path, &error))?;
        }

        for goal in &goals {
            store::goals::write_new_goal(&tx, &db_path, goal)?;
        }
        for tip in &tips {
            store::tips::write_tip(&tx, &db_path, tip)?;
        }

        tx.commit()
            .map_err(|error| map_sqlite_error(&db_path, &error))?;
    }

    log::info!("seeded demo data for user {user_id}");
    let counts = DemoSeedCounts {
        transactions: transactions.len(),
        budgets: budgets.len(),
        goals: goals.len(),
        tips: tips.len(),
    };
    Ok((session.reload()?, counts))
}

fn demo_transactions() -> ClientResult<Vec<NewTransaction>> {
    Ok(vec![
        NewTransaction {
            amount: Decimal::from(1200),
            date: demo_date(2023, 4, 1)?,
            description: "Rent payment".to_string(),
            category: Category::Housing,
            is_income: false,
            recurrence: Some(Period::Monthly),
        },
        NewTransaction {
            amount: Decimal::new(8542, 2),
            date: demo_date(2023, 4, 2)?,
            description: "Grocery shopping".to_string(),
            category: Category::Food,
            is_income: false,
            recurrence: None,
        },
        NewTransaction {
            amount: Decimal::from(4500),
            date: demo_date(2023, 4, 5)?,
            description: "Salary deposit".to_string(),
            category: Category::Income,
            is_income: true,
            recurrence: Some(Period::Monthly),
        },
    ])
}

fn demo_budgets() -> Vec<DemoBudget> {
    vec![
        DemoBudget {
            category: Category::Housing,
            limit: 1500,
            cached_spent: 1200,
        },
        DemoBudget {
            category: Category::Food,
            limit: 600,
            cached_spent: 320,
        },
    ]
}

fn demo_goals(user_id: &str) -> ClientResult<Vec<SavingsGoal>> {
    Ok(vec![
        SavingsGoal {
            id: new_id("goal"),
            user_id: user_id.to_string(),
            name: "Emergency Fund".to_string(),
            target_amount: Decimal::from(10_000),
            current_amount: Decimal::from(5_000),
            deadline: None,
            category: GoalCategory::Emergency,
            priority: Priority::High,
            is_completed: false,
            created_at: demo_timestamp("2023-02-01T00:00:00Z")?,
            image_url: None,
        },
        SavingsGoal {
            id: new_id("goal"),
            user_id: user_id.to_string(),
            name: "Japan Trip".to_string(),
            target_amount: Decimal::from(3_500),
            current_amount: Decimal::from(1_200),
            deadline: Some(demo_date(2023, 12, 31)?),
            category: GoalCategory::Vacation,
            priority: Priority::Medium,
            is_completed: false,
            created_at: demo_timestamp("2023-01-15T00:00:00Z")?,
            image_url: None,
        },
    ])
}

fn demo_tips(user_id: &str) -> ClientResult<Vec<AiTip>> {
    Ok(vec![AiTip {
        id: new_id("tip"),
        user_id: user_id.to_string(),
        content: "You've spent 80% of your entertainment budget this month. \
                  Consider limiting non-essential activities for the next week."
            .to_string(),
        category: Some("budgeting".to_string()),
        created_at: demo_timestamp("2023-04-20T00:00:00Z")?,
        is_read: false,
        relevance_score: Some(0.85),
    }])
}

fn demo_date(year: i32, month: u32, day: u32) -> ClientResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| ClientError::internal_serialization("Invalid demo calendar date."))
}

fn demo_timestamp(value: &str) -> ClientResult<DateTime<Utc>> {
    parse_timestamp(value)
        .ok_or_else(|| ClientError::internal_serialization("Invalid demo timestamp."))
}
