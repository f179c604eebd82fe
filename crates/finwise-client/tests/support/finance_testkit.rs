#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use finwise_client::domain::{Category, NewTransaction};
use finwise_client::{ClientResult, FinanceSession, SuccessEnvelope};
use rust_decimal::Decimal;
use serde_json::Value;
use tempfile::{Builder, TempDir};

pub fn temp_home(prefix: &str) -> std::io::Result<(TempDir, PathBuf)> {
    let dir = Builder::new().prefix(prefix).tempdir()?;
    let home = dir.path().join("finwise-home");
    fs::create_dir_all(&home)?;
    Ok((dir, home))
}

pub fn open_session(home: &Path, user: &str) -> ClientResult<FinanceSession> {
    FinanceSession::open(Some(home), Some(user))
}

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

pub fn expense(category: Category, amount: Decimal, description: &str) -> NewTransaction {
    NewTransaction {
        amount,
        date: day(2023, 4, 10),
        description: description.to_string(),
        category,
        is_income: false,
        recurrence: None,
    }
}

pub fn income(category: Category, amount: Decimal, description: &str) -> NewTransaction {
    NewTransaction {
        is_income: true,
        ..expense(category, amount, description)
    }
}

/// Serializes an envelope so tests can assert on the wire shape.
pub fn payload(result: ClientResult<SuccessEnvelope>) -> Value {
    assert!(result.is_ok(), "command failed: {:?}", result.as_ref().err());
    if let Ok(envelope) = result {
        let value = serde_json::to_value(envelope);
        assert!(value.is_ok());
        if let Ok(json) = value {
            return json;
        }
    }
    Value::Null
}

pub fn write_fixture(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    let written = fs::write(&path, body);
    assert!(written.is_ok());
    path
}
