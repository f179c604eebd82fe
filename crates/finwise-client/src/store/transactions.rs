use std::path::Path;

use rusqlite::{Connection, TransactionBehavior, params};

use crate::domain::date::format_iso_date;
use crate::domain::validate::validate_new_transaction;
use crate::domain::{NewTransaction, Transaction};
use crate::state::map_sqlite_error;
use crate::store::rows::TransactionRow;
use crate::store::{new_id, now_timestamp, query_entities};
use crate::ClientResult;

pub fn insert_transaction(
    connection: &Connection,
    db_path: &Path,
    user_id: &str,
    new: &NewTransaction,
) -> ClientResult<Transaction> {
    validate_new_transaction(new)?;
    let transaction = write_row(connection, db_path, user_id, new, None)?;
    log::debug!(
        "recorded transaction {} ({} {})",
        transaction.id,
        transaction.category.as_str(),
        transaction.amount
    );
    Ok(transaction)
}

/// Inserts every row or none. Rows must already be validated.
pub fn insert_batch(
    connection: &mut Connection,
    db_path: &Path,
    user_id: &str,
    rows: &[NewTransaction],
    import_id: &str,
) -> ClientResult<Vec<Transaction>> {
    let tx = connection
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut inserted = Vec::with_capacity(rows.len());
    for new in rows {
        validate_new_transaction(new)?;
        inserted.push(write_row(&tx, db_path, user_id, new, Some(import_id))?);
    }

    tx.commit()
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    log::info!("import {import_id} committed {} transactions", inserted.len());
    Ok(inserted)
}

/// Newest first by date, then by insertion.
pub fn list_transactions(
    connection: &Connection,
    db_path: &Path,
    user_id: &str,
) -> ClientResult<Vec<Transaction>> {
    let sql = format!(
        "SELECT {} FROM transactions WHERE user_id = ?1 ORDER BY date DESC, created_at DESC, id DESC",
        TransactionRow::COLUMNS
    );
    query_entities(
        connection,
        db_path,
        &sql,
        params![user_id],
        TransactionRow::from_row,
    )
}

fn write_row(
    connection: &Connection,
    db_path: &Path,
    user_id: &str,
    new: &NewTransaction,
    import_id: Option<&str>,
) -> ClientResult<Transaction> {
    let transaction = Transaction {
        id: new_id("txn"),
        user_id: user_id.to_string(),
        amount: new.amount,
        date: new.date,
        description: new.description.clone(),
        category: new.category,
        is_income: new.is_income,
        is_recurring: new.recurrence.is_some(),
        recurrence: new.recurrence,
    };

    connection
        .execute(
            "INSERT INTO transactions (
                id, user_id, amount, date, description, category,
                is_income, is_recurring, recurrence, import_id, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                transaction.id,
                transaction.user_id,
                transaction.amount.to_string(),
                format_iso_date(&transaction.date),
                transaction.description,
                transaction.category.as_str(),
                transaction.is_income,
                transaction.is_recurring,
                transaction.recurrence.map(|period| period.as_str()),
                import_id,
                now_timestamp(),
            ],
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    Ok(transaction)
}
