use std::fs;

use finwise_client::setup::ensure_initialized_at;
use rusqlite::Connection;
use tempfile::tempdir;

fn object_exists(connection: &Connection, object_type: &str, object_name: &str) -> bool {
    connection
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = ?1 AND name = ?2",
            [object_type, object_name],
            |_row| Ok(()),
        )
        .is_ok()
}

fn meta_value(connection: &Connection, key: &str) -> Option<String> {
    connection
        .query_row(
            "SELECT value FROM internal_meta WHERE key = ?1 LIMIT 1",
            [key],
            |row| row.get::<_, String>(0),
        )
        .ok()
}

fn user_version(connection: &Connection) -> Option<i64> {
    connection
        .query_row("PRAGMA user_version", [], |row| row.get::<_, i64>(0))
        .ok()
}

#[test]
fn setup_creates_ledger_db_at_home_override() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("finwise-home");

        let context = ensure_initialized_at(&home);
        assert!(context.is_ok());
        if let Ok(setup_context) = context {
            assert!(setup_context.db_path.ends_with("ledger.db"));
            assert_eq!(setup_context.schema_version, "v1");
            assert!(home.join("ledger.db").exists());
            for table in ["transactions", "budgets", "savings_goals", "ai_tips"] {
                assert!(object_exists(&setup_context.connection, "table", table));
            }
        }
    }
}

#[test]
fn migrations_apply_exactly_once() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("finwise-home");

        for _ in 0..2 {
            let context = ensure_initialized_at(&home);
            assert!(context.is_ok());
            if let Ok(setup_context) = context {
                assert_eq!(user_version(&setup_context.connection), Some(2));
            }
        }
    }
}

#[test]
fn setup_repairs_missing_index() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("finwise-home");

        let context = ensure_initialized_at(&home);
        assert!(context.is_ok());
        if let Ok(setup_context) = context {
            let dropped = setup_context
                .connection
                .execute_batch("DROP INDEX idx_savings_goals_user_created_at;");
            assert!(dropped.is_ok());
        }

        let repaired = ensure_initialized_at(&home);
        assert!(repaired.is_ok());
        if let Ok(setup_context) = repaired {
            assert!(object_exists(
                &setup_context.connection,
                "index",
                "idx_savings_goals_user_created_at"
            ));
        }
    }
}

#[test]
fn setup_restores_missing_meta_key() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("finwise-home");

        let context = ensure_initialized_at(&home);
        assert!(context.is_ok());
        if let Ok(setup_context) = context {
            let deleted = setup_context.connection.execute(
                "DELETE FROM internal_meta WHERE key = ?1",
                ["import_contract_version"],
            );
            assert!(deleted.is_ok());
        }

        let repaired = ensure_initialized_at(&home);
        assert!(repaired.is_ok());
        if let Ok(setup_context) = repaired {
            assert_eq!(
                meta_value(&setup_context.connection, "import_contract_version"),
                Some("v1".to_string())
            );
        }
    }
}

#[test]
fn setup_rejects_drifted_meta_value() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("finwise-home");

        let context = ensure_initialized_at(&home);
        assert!(context.is_ok());
        if let Ok(setup_context) = context {
            let updated = setup_context.connection.execute(
                "UPDATE internal_meta SET value = 'v9' WHERE key = 'schema_version'",
                [],
            );
            assert!(updated.is_ok());
        }

        let failed = ensure_initialized_at(&home);
        assert!(failed.is_err());
        if let Err(error) = failed {
            assert_eq!(error.code, "ledger_corrupt");
        }
    }
}

#[test]
fn setup_fails_when_core_column_missing() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("finwise-home");

        let context = ensure_initialized_at(&home);
        assert!(context.is_ok());
        if let Ok(setup_context) = context {
            let altered = setup_context
                .connection
                .execute_batch("ALTER TABLE savings_goals DROP COLUMN image_url;");
            assert!(altered.is_ok());
        }

        let failed = ensure_initialized_at(&home);
        assert!(failed.is_err());
        if let Err(error) = failed {
            assert_eq!(error.code, "ledger_corrupt");
        }
    }
}

#[test]
fn setup_maps_locked_database_to_ledger_locked() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("finwise-home");

        let context = ensure_initialized_at(&home);
        assert!(context.is_ok());
        if let Ok(setup_context) = context {
            let holder = Connection::open(&setup_context.db_path);
            assert!(holder.is_ok());
            if let Ok(conn) = holder {
                assert!(conn.execute_batch("BEGIN EXCLUSIVE;").is_ok());

                let locked = ensure_initialized_at(&home);
                assert!(locked.is_err());
                if let Err(error) = locked {
                    assert_eq!(error.code, "ledger_locked");
                }

                assert!(conn.execute_batch("ROLLBACK;").is_ok());
            }
        }
    }
}

#[test]
fn setup_maps_non_sqlite_file_to_ledger_corrupt() {
    let temp = tempdir();
    assert!(temp.is_ok());
    if let Ok(temp_dir) = temp {
        let home = temp_dir.path().join("finwise-home");
        assert!(fs::create_dir_all(&home).is_ok());
        assert!(fs::write(home.join("ledger.db"), "not-a-sqlite-database").is_ok());

        let result = ensure_initialized_at(&home);
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "ledger_corrupt");
        }
    }
}
