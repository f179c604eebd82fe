use std::path::Path;

use rusqlite::{Connection, TransactionBehavior, params};
use rust_decimal::Decimal;

use crate::domain::date::format_iso_date;
use crate::domain::validate::validate_new_budget;
use crate::domain::{Budget, NewBudget};
use crate::state::map_sqlite_error;
use crate::store::rows::BudgetRow;
use crate::store::{new_id, now_timestamp, query_entities};
use crate::ClientResult;

pub fn insert_budget(
    connection: &Connection,
    db_path: &Path,
    user_id: &str,
    new: &NewBudget,
) -> ClientResult<Budget> {
    validate_new_budget(new)?;
    let budget = Budget {
        id: new_id("bud"),
        user_id: user_id.to_string(),
        category: new.category,
        limit: new.limit,
        period: new.period,
        start_date: new.start_date,
        is_active: true,
        current_spent: Decimal::ZERO,
    };

    connection
        .execute(
            "INSERT INTO budgets (
                id, user_id, category, limit_amount, period, start_date,
                is_active, current_spent, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                budget.id,
                budget.user_id,
                budget.category.as_str(),
                budget.limit.to_string(),
                budget.period.as_str(),
                format_iso_date(&budget.start_date),
                budget.is_active,
                budget.current_spent.to_string(),
                now_timestamp(),
            ],
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    log::debug!(
        "created budget {} for {} limit {}",
        budget.id,
        budget.category.as_str(),
        budget.limit
    );
    Ok(budget)
}

/// Oldest first, so summaries list budgets in creation order.
pub fn list_budgets(
    connection: &Connection,
    db_path: &Path,
    user_id: &str,
) -> ClientResult<Vec<Budget>> {
    let sql = format!(
        "SELECT {} FROM budgets WHERE user_id = ?1 ORDER BY created_at ASC, id ASC",
        BudgetRow::COLUMNS
    );
    query_entities(connection, db_path, &sql, params![user_id], BudgetRow::from_row)
}

/// Persists freshly recomputed `current_spent` values. The column is a cache;
/// readers always recompute before trusting it.
pub fn write_spent_cache(
    connection: &mut Connection,
    db_path: &Path,
    user_id: &str,
    budgets: &[Budget],
) -> ClientResult<()> {
    let tx = connection
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    {
        let mut statement = tx
            .prepare("UPDATE budgets SET current_spent = ?1 WHERE id = ?2 AND user_id = ?3")
            .map_err(|error| map_sqlite_error(db_path, &error))?;
        for budget in budgets {
            statement
                .execute(params![budget.current_spent.to_string(), budget.id, user_id])
                .map_err(|error| map_sqlite_error(db_path, &error))?;
        }
    }
    tx.commit()
        .map_err(|error| map_sqlite_error(db_path, &error))
}
