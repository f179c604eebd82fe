mod support;

use std::path::Path;

use finwise_client::commands::tips::{self, TipListOptions, TipReadOptions};
use rusqlite::{Connection, params};
use support::finance_testkit::{open_session, payload, temp_home};

fn insert_tip(home: &Path, id: &str, user: &str, score: Option<f64>, is_read: bool) {
    let connection = Connection::open(home.join("ledger.db"));
    assert!(connection.is_ok());
    if let Ok(conn) = connection {
        let inserted = conn.execute(
            "INSERT INTO ai_tips (id, user_id, content, category, created_at, is_read, relevance_score)
             VALUES (?1, ?2, ?3, 'saving', '2023-04-20T00:00:00Z', ?4, ?5)",
            params![id, user, format!("tip {id}"), is_read, score],
        );
        assert!(inserted.is_ok());
    }
}

fn seeded_home(prefix: &str) -> Option<(tempfile::TempDir, std::path::PathBuf)> {
    let home = temp_home(prefix);
    assert!(home.is_ok());
    let (dir, home_path) = home.ok()?;
    assert!(open_session(&home_path, "user1").is_ok());
    insert_tip(&home_path, "tip_low", "user1", Some(0.2), false);
    insert_tip(&home_path, "tip_high", "user1", Some(0.9), false);
    insert_tip(&home_path, "tip_unscored", "user1", None, false);
    insert_tip(&home_path, "tip_read", "user1", Some(0.95), true);
    insert_tip(&home_path, "tip_other", "user2", Some(0.99), false);
    Some((dir, home_path))
}

fn list_ids(home: &Path, unread_only: bool, limit: Option<usize>) -> Vec<String> {
    let json = payload(tips::list(TipListOptions {
        unread_only,
        limit,
        home_override: Some(home),
        user_override: Some("user1"),
    }));
    json["data"]["rows"]
        .as_array()
        .map(|rows| {
            rows.iter()
                .filter_map(|row| row["id"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn tips_are_ordered_by_relevance_with_unscored_last() {
    let seeded = seeded_home("finwise-tips-order");
    assert!(seeded.is_some());
    if let Some((_dir, home_path)) = seeded {
        assert_eq!(
            list_ids(&home_path, false, None),
            vec!["tip_read", "tip_high", "tip_low", "tip_unscored"]
        );
        assert_eq!(
            list_ids(&home_path, true, Some(2)),
            vec!["tip_high", "tip_low"]
        );
    }
}

#[test]
fn reading_a_tip_removes_it_from_the_unread_list() {
    let seeded = seeded_home("finwise-tips-read");
    assert!(seeded.is_some());
    if let Some((_dir, home_path)) = seeded {
        let json = payload(tips::read(TipReadOptions {
            tip_id: "tip_high".to_string(),
            home_override: Some(&home_path),
            user_override: Some("user1"),
        }));
        assert_eq!(json["data"]["tip"]["is_read"], true);
        assert_eq!(
            list_ids(&home_path, true, None),
            vec!["tip_low", "tip_unscored"]
        );
    }
}

#[test]
fn other_users_tips_are_not_found() {
    let seeded = seeded_home("finwise-tips-owner");
    assert!(seeded.is_some());
    if let Some((_dir, home_path)) = seeded {
        let result = tips::read(TipReadOptions {
            tip_id: "tip_other".to_string(),
            home_override: Some(&home_path),
            user_override: Some("user1"),
        });
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "tip_not_found");
        }
    }
}
