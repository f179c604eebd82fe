use std::path::Path;

use crate::ClientResult;
use crate::commands::common::{open_session, parse_amount, parse_choice, parse_date};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{
    ImportData, SummaryView, TransactionAddData, TransactionListData, TransactionView,
};
use crate::domain::date::today;
use crate::domain::{Category, NewTransaction, Period};
use crate::import;

#[derive(Debug, Default)]
pub struct TransactionAddOptions<'a> {
    pub amount: String,
    pub category: String,
    pub description: String,
    pub date: Option<String>,
    pub is_income: bool,
    pub recurrence: Option<String>,
    pub home_override: Option<&'a Path>,
    pub user_override: Option<&'a str>,
}

#[derive(Debug, Default)]
pub struct TransactionListOptions<'a> {
    pub limit: Option<usize>,
    pub home_override: Option<&'a Path>,
    pub user_override: Option<&'a str>,
}

#[derive(Debug, Default)]
pub struct TransactionImportOptions<'a> {
    pub path: Option<String>,
    pub dry_run: bool,
    pub home_override: Option<&'a Path>,
    pub user_override: Option<&'a str>,
    pub stdin_override: Option<String>,
}

pub fn add(options: TransactionAddOptions<'_>) -> ClientResult<SuccessEnvelope> {
    const COMMAND: &str = "transaction add";
    let new = NewTransaction {
        amount: parse_amount(COMMAND, "--amount", &options.amount)?,
        date: match options.date.as_deref() {
            Some(raw) => parse_date(COMMAND, "--date", raw)?,
            None => today(),
        },
        description: options.description.trim().to_string(),
        category: parse_choice(
            COMMAND,
            "--category",
            &options.category,
            &Category::ALL,
            Category::as_str,
            Category::parse,
        )?,
        is_income: options.is_income,
        recurrence: match options.recurrence.as_deref() {
            Some(raw) => Some(parse_choice(
                COMMAND,
                "--recurring",
                raw,
                &Period::ALL,
                Period::as_str,
                Period::parse,
            )?),
            None => None,
        },
    };

    let mut session = open_session(options.home_override, options.user_override)?;
    let transaction = session.add_transaction(&new)?;
    let data = TransactionAddData {
        transaction: TransactionView::from(&transaction),
        summary: SummaryView::from(session.summary()),
    };
    success(COMMAND, data)
}

pub fn list(options: TransactionListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let session = open_session(options.home_override, options.user_override)?;
    let all = session.transactions();
    let shown = match options.limit {
        Some(limit) => session.recent_transactions(limit),
        None => all,
    };
    let data = TransactionListData {
        total: all.len(),
        returned: shown.len(),
        rows: shown.iter().map(TransactionView::from).collect(),
    };
    success("transaction list", data)
}

pub fn import(options: TransactionImportOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let mut session = open_session(options.home_override, options.user_override)?;
    let execution = import::execute(
        &mut session,
        options.path.clone(),
        options.dry_run,
        options.stdin_override,
    )?;

    let budget_summary = if execution.dry_run {
        None
    } else {
        Some(SummaryView::from(session.summary()))
    };
    let data = ImportData {
        dry_run: execution.dry_run,
        path: options.path,
        import_id: execution.import_id,
        message: execution.message,
        source_kind: execution.source_kind.to_string(),
        summary: execution.summary,
        issues: execution.issues,
        budget_summary,
    };
    success("transaction import", data)
}
