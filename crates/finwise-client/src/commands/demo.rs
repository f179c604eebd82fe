use std::path::Path;

use crate::ClientResult;
use crate::commands::common::open_session;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{DemoSeedData, SummaryView};
use crate::demo;

#[derive(Debug, Default)]
pub struct DemoSeedOptions<'a> {
    pub home_override: Option<&'a Path>,
    pub user_override: Option<&'a str>,
}

pub fn seed(options: DemoSeedOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let session = open_session(options.home_override, options.user_override)?;
    let (session, counts) = demo::seed(session)?;
    let data = DemoSeedData {
        user_id: session.user_id().to_string(),
        message: "Demo data written. Run `finwise overview` to explore it.".to_string(),
        transactions: counts.transactions,
        budgets: counts.budgets,
        goals: counts.goals,
        tips: counts.tips,
        summary: SummaryView::from(session.summary()),
    };
    success("demo seed", data)
}
