use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};

use crate::domain::AiTip;
use crate::domain::date::format_timestamp;
use crate::state::map_sqlite_error;
use crate::store::rows::AiTipRow;
use crate::store::{query_entities, stored_value_error};
use crate::{ClientError, ClientResult};

/// Tips ordering: highest relevance first, unscored tips last, newest first
/// within equal scores.
const TIP_ORDER: &str = "ORDER BY relevance_score IS NULL, relevance_score DESC, created_at DESC";

pub(crate) fn write_tip(connection: &Connection, db_path: &Path, tip: &AiTip) -> ClientResult<()> {
    connection
        .execute(
            "INSERT INTO ai_tips (id, user_id, content, category, created_at, is_read, relevance_score)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                tip.id,
                tip.user_id,
                tip.content,
                tip.category,
                format_timestamp(&tip.created_at),
                tip.is_read,
                tip.relevance_score,
            ],
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    Ok(())
}

pub fn list_tips(
    connection: &Connection,
    db_path: &Path,
    user_id: &str,
    unread_only: bool,
    limit: Option<usize>,
) -> ClientResult<Vec<AiTip>> {
    let read_filter = if unread_only {
        " AND COALESCE(is_read, 0) = 0"
    } else {
        ""
    };
    let sql = format!(
        "SELECT {} FROM ai_tips WHERE user_id = ?1{read_filter} {TIP_ORDER} LIMIT ?2",
        AiTipRow::COLUMNS
    );
    let sql_limit = limit.map_or(-1, |value| i64::try_from(value).unwrap_or(i64::MAX));
    query_entities(
        connection,
        db_path,
        &sql,
        params![user_id, sql_limit],
        AiTipRow::from_row,
    )
}

pub fn mark_tip_read(
    connection: &Connection,
    db_path: &Path,
    user_id: &str,
    tip_id: &str,
) -> ClientResult<AiTip> {
    let changed = connection
        .execute(
            "UPDATE ai_tips SET is_read = 1 WHERE id = ?1 AND user_id = ?2",
            params![tip_id, user_id],
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    if changed == 0 {
        return Err(ClientError::tip_not_found(tip_id));
    }

    let sql = format!(
        "SELECT {} FROM ai_tips WHERE id = ?1 AND user_id = ?2",
        AiTipRow::COLUMNS
    );
    let row = connection
        .query_row(&sql, params![tip_id, user_id], AiTipRow::from_row)
        .optional()
        .map_err(|error| map_sqlite_error(db_path, &error))?
        .ok_or_else(|| ClientError::tip_not_found(tip_id))?;
    AiTip::try_from(row).map_err(|error| stored_value_error(db_path, &error))
}
