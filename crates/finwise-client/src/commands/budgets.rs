use std::path::Path;

use crate::ClientResult;
use crate::commands::common::{open_session, parse_amount, parse_choice, parse_date};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{
    BudgetCreateData, BudgetListData, BudgetSummaryData, BudgetView, CashFlowView, SummaryView,
};
use crate::domain::date::today;
use crate::domain::{Category, NewBudget, Period};

#[derive(Debug, Default)]
pub struct BudgetCreateOptions<'a> {
    pub category: String,
    pub limit: String,
    pub period: Option<String>,
    pub start_date: Option<String>,
    pub home_override: Option<&'a Path>,
    pub user_override: Option<&'a str>,
}

/// Shared by the read-only budget commands.
#[derive(Debug, Default)]
pub struct BudgetReadOptions<'a> {
    pub home_override: Option<&'a Path>,
    pub user_override: Option<&'a str>,
}

pub fn create(options: BudgetCreateOptions<'_>) -> ClientResult<SuccessEnvelope> {
    const COMMAND: &str = "budget create";
    let new = NewBudget {
        category: parse_choice(
            COMMAND,
            "--category",
            &options.category,
            &Category::ALL,
            Category::as_str,
            Category::parse,
        )?,
        limit: parse_amount(COMMAND, "--limit", &options.limit)?,
        period: match options.period.as_deref() {
            Some(raw) => parse_choice(
                COMMAND,
                "--period",
                raw,
                &Period::ALL,
                Period::as_str,
                Period::parse,
            )?,
            None => Period::Monthly,
        },
        start_date: match options.start_date.as_deref() {
            Some(raw) => parse_date(COMMAND, "--start-date", raw)?,
            None => today(),
        },
    };

    let mut session = open_session(options.home_override, options.user_override)?;
    let budget = session.create_budget(&new)?;
    let data = BudgetCreateData {
        budget: BudgetView::from(&budget),
        summary: SummaryView::from(session.summary()),
    };
    success(COMMAND, data)
}

pub fn list(options: BudgetReadOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let session = open_session(options.home_override, options.user_override)?;
    let data = BudgetListData {
        rows: session.budgets().iter().map(BudgetView::from).collect(),
    };
    success("budget list", data)
}

pub fn summary(options: BudgetReadOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let session = open_session(options.home_override, options.user_override)?;
    let data = BudgetSummaryData {
        summary: SummaryView::from(session.summary()),
        cash_flow: CashFlowView::from(&session.cash_flow()),
    };
    success("budget summary", data)
}
