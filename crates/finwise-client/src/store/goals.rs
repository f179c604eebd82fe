use std::path::Path;

use rusqlite::{Connection, OptionalExtension, TransactionBehavior, params};
use rust_decimal::Decimal;

use crate::domain::date::{format_iso_date, format_timestamp};
use crate::domain::validate::validate_new_goal;
use crate::domain::{DomainResult, NewSavingsGoal, SavingsGoal};
use crate::goals::{GoalUpdate, contribute, set_current_amount};
use crate::state::map_sqlite_error;
use crate::store::rows::SavingsGoalRow;
use crate::store::{new_id, query_entities, stored_value_error};
use crate::{ClientError, ClientResult};

pub fn insert_goal(
    connection: &Connection,
    db_path: &Path,
    user_id: &str,
    new: &NewSavingsGoal,
) -> ClientResult<SavingsGoal> {
    validate_new_goal(new)?;
    let goal = SavingsGoal {
        id: new_id("goal"),
        user_id: user_id.to_string(),
        name: new.name.trim().to_string(),
        target_amount: new.target_amount,
        current_amount: Decimal::ZERO,
        deadline: new.deadline,
        category: new.category,
        priority: new.priority,
        is_completed: false,
        created_at: chrono::Utc::now(),
        image_url: new.image_url.clone(),
    };
    write_new_goal(connection, db_path, &goal)?;
    log::debug!("created goal {} target {}", goal.id, goal.target_amount);
    Ok(goal)
}

/// Writes a fully formed goal. Used by the demo seed, which carries its own
/// running totals and timestamps.
pub(crate) fn write_new_goal(
    connection: &Connection,
    db_path: &Path,
    goal: &SavingsGoal,
) -> ClientResult<()> {
    connection
        .execute(
            "INSERT INTO savings_goals (
                id, user_id, name, target_amount, current_amount, deadline,
                category, priority, is_completed, created_at, image_url
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                goal.id,
                goal.user_id,
                goal.name,
                goal.target_amount.to_string(),
                goal.current_amount.to_string(),
                goal.deadline.as_ref().map(format_iso_date),
                goal.category.as_str(),
                goal.priority.as_str(),
                goal.is_completed,
                format_timestamp(&goal.created_at),
                goal.image_url,
            ],
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    Ok(())
}

pub fn list_goals(
    connection: &Connection,
    db_path: &Path,
    user_id: &str,
) -> ClientResult<Vec<SavingsGoal>> {
    let sql = format!(
        "SELECT {} FROM savings_goals WHERE user_id = ?1 ORDER BY created_at ASC, id ASC",
        SavingsGoalRow::COLUMNS
    );
    query_entities(
        connection,
        db_path,
        &sql,
        params![user_id],
        SavingsGoalRow::from_row,
    )
}

pub fn contribute_to_goal(
    connection: &mut Connection,
    db_path: &Path,
    user_id: &str,
    goal_id: &str,
    amount: Decimal,
) -> ClientResult<GoalUpdate> {
    mutate_goal(connection, db_path, user_id, goal_id, |goal| {
        contribute(goal, amount)
    })
}

pub fn set_goal_amount(
    connection: &mut Connection,
    db_path: &Path,
    user_id: &str,
    goal_id: &str,
    amount: Decimal,
) -> ClientResult<GoalUpdate> {
    mutate_goal(connection, db_path, user_id, goal_id, |goal| {
        set_current_amount(goal, amount)
    })
}

/// Read, apply and write under one immediate transaction. SQLite's reserved
/// lock keeps a second writer from reading the old amount until we commit.
fn mutate_goal<F>(
    connection: &mut Connection,
    db_path: &Path,
    user_id: &str,
    goal_id: &str,
    apply: F,
) -> ClientResult<GoalUpdate>
where
    F: FnOnce(&SavingsGoal) -> DomainResult<GoalUpdate>,
{
    let tx = connection
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let sql = format!(
        "SELECT {} FROM savings_goals WHERE id = ?1 AND user_id = ?2",
        SavingsGoalRow::COLUMNS
    );
    let row = tx
        .query_row(&sql, params![goal_id, user_id], SavingsGoalRow::from_row)
        .optional()
        .map_err(|error| map_sqlite_error(db_path, &error))?
        .ok_or_else(|| ClientError::goal_not_found(goal_id))?;
    let current = SavingsGoal::try_from(row).map_err(|error| stored_value_error(db_path, &error))?;

    let update = apply(&current)?;

    tx.execute(
        "UPDATE savings_goals SET current_amount = ?1, is_completed = ?2
         WHERE id = ?3 AND user_id = ?4",
        params![
            update.goal.current_amount.to_string(),
            update.goal.is_completed,
            goal_id,
            user_id,
        ],
    )
    .map_err(|error| map_sqlite_error(db_path, &error))?;
    tx.commit()
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    if update.just_completed {
        log::info!("goal {goal_id} reached its target of {}", update.goal.target_amount);
    } else {
        log::debug!(
            "goal {goal_id} now at {} of {}",
            update.goal.current_amount,
            update.goal.target_amount
        );
    }
    Ok(update)
}
