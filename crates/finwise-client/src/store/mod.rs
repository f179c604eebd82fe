//! SQLite persistence for one user's ledger. Every query is scoped by
//! `user_id`; rows only leave this module as domain entities.

pub mod budgets;
pub mod goals;
pub mod rows;
pub mod tips;
pub mod transactions;

use std::path::Path;

use rusqlite::{Connection, Row, params};

use crate::domain::date::format_timestamp;
use crate::state::map_sqlite_error;
use crate::{ClientError, ClientResult};
use rows::StoredValueError;

pub(crate) fn new_id(prefix: &str) -> String {
    format!("{prefix}_{}", ulid::Ulid::new())
}

pub(crate) fn now_timestamp() -> String {
    format_timestamp(&chrono::Utc::now())
}

pub(crate) fn stored_value_error(db_path: &Path, error: &StoredValueError) -> ClientError {
    ClientError::invalid_stored_value(db_path, error.table, error.column, &error.value)
}

/// Runs a user-scoped query, reads each row into its wire shape and converts
/// it into the domain entity.
pub(crate) fn query_entities<W, T>(
    connection: &Connection,
    db_path: &Path,
    sql: &str,
    params: impl rusqlite::Params,
    read_row: fn(&Row<'_>) -> rusqlite::Result<W>,
) -> ClientResult<Vec<T>>
where
    T: TryFrom<W, Error = StoredValueError>,
{
    let mut statement = connection
        .prepare(sql)
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    let row_iter = statement
        .query_map(params, read_row)
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut entities = Vec::new();
    for row in row_iter {
        let wire = row.map_err(|error| map_sqlite_error(db_path, &error))?;
        let entity = T::try_from(wire).map_err(|error| stored_value_error(db_path, &error))?;
        entities.push(entity);
    }
    Ok(entities)
}

/// True when the user owns at least one transaction, budget, goal or tip.
pub fn user_has_data(connection: &Connection, db_path: &Path, user_id: &str) -> ClientResult<bool> {
    let count = connection
        .query_row(
            "SELECT
                (SELECT COUNT(*) FROM transactions WHERE user_id = ?1)
              + (SELECT COUNT(*) FROM budgets WHERE user_id = ?1)
              + (SELECT COUNT(*) FROM savings_goals WHERE user_id = ?1)
              + (SELECT COUNT(*) FROM ai_tips WHERE user_id = ?1)",
            params![user_id],
            |row| row.get::<_, i64>(0),
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    Ok(count > 0)
}
