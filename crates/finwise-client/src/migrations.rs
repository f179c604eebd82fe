use std::collections::HashMap;

use rusqlite::Connection;
use rusqlite_migration::{M, Migrations};

const BOOTSTRAP_SQL: &str = include_str!("migrations/0001_bootstrap.sql");
const ADD_AI_TIPS_SQL: &str = include_str!("migrations/0002_add_ai_tips.sql");

const MIGRATION_SOURCES: [&str; 2] = [BOOTSTRAP_SQL, ADD_AI_TIPS_SQL];

/// `PRAGMA user_version` after every migration has been applied.
pub const EXPECTED_USER_VERSION: i64 = MIGRATION_SOURCES.len() as i64;

pub const REQUIRED_INDEX_NAMES: [&str; 5] = [
    "idx_transactions_user_date",
    "idx_transactions_import_id",
    "idx_budgets_user_category",
    "idx_savings_goals_user_created_at",
    "idx_ai_tips_user_is_read",
];

pub const REQUIRED_META_KEYS: [(&str, &str); 2] = [
    ("schema_version", "v1"),
    ("import_contract_version", "v1"),
];

pub fn run_pending(conn: &mut Connection) -> rusqlite_migration::Result<()> {
    let migrations = Migrations::new(MIGRATION_SOURCES.iter().map(|sql| M::up(sql)).collect());
    migrations.to_latest(conn)
}

pub fn safe_repair_statement(statement_name: &str) -> Option<String> {
    parse_safe_repair_statements().remove(statement_name)
}

fn parse_safe_repair_statements() -> HashMap<String, String> {
    let mut blocks: HashMap<String, String> = HashMap::new();
    let mut active_name: Option<String> = None;
    let mut active_sql = String::new();

    for line in MIGRATION_SOURCES.iter().flat_map(|sql| sql.lines()) {
        let trimmed = line.trim();

        if let Some(name) = trimmed.strip_prefix("-- finwise:safe_repair:start:") {
            active_name = Some(name.to_string());
            active_sql.clear();
            continue;
        }

        if let Some(name) = trimmed.strip_prefix("-- finwise:safe_repair:end:") {
            if let Some(active) = &active_name
                && active == name
            {
                blocks.insert(name.to_string(), active_sql.trim().to_string());
            }
            active_name = None;
            active_sql.clear();
            continue;
        }

        if active_name.is_some() {
            active_sql.push_str(line);
            active_sql.push('\n');
        }
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::{EXPECTED_USER_VERSION, REQUIRED_INDEX_NAMES, safe_repair_statement};

    #[test]
    fn every_required_index_has_a_repair_statement() {
        for name in REQUIRED_INDEX_NAMES {
            let sql = safe_repair_statement(name);
            assert!(sql.is_some(), "missing repair block for {name}");
            if let Some(statement) = sql {
                assert!(statement.starts_with("CREATE INDEX IF NOT EXISTS"));
            }
        }
    }

    #[test]
    fn user_version_tracks_migration_count() {
        assert_eq!(EXPECTED_USER_VERSION, 2);
    }
}
