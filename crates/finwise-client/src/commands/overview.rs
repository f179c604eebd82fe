use std::path::Path;

use crate::ClientResult;
use crate::commands::common::open_session;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{
    CashFlowView, GoalView, OverviewData, SummaryView, TipView, TransactionView,
};

const RECENT_TRANSACTIONS: usize = 5;
const UNREAD_TIPS: usize = 3;

#[derive(Debug, Default)]
pub struct OverviewOptions<'a> {
    pub home_override: Option<&'a Path>,
    pub user_override: Option<&'a str>,
}

/// Dashboard view: budget summary, cash flow, latest transactions, goal
/// progress and the most relevant unread tips.
pub fn run(options: OverviewOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let session = open_session(options.home_override, options.user_override)?;
    let data = OverviewData {
        user_id: session.user_id().to_string(),
        summary: SummaryView::from(session.summary()),
        cash_flow: CashFlowView::from(&session.cash_flow()),
        recent_transactions: session
            .recent_transactions(RECENT_TRANSACTIONS)
            .iter()
            .map(TransactionView::from)
            .collect(),
        goals: session.goals().iter().map(GoalView::from).collect(),
        unread_tips: session
            .unread_tips(UNREAD_TIPS)
            .into_iter()
            .map(TipView::from)
            .collect(),
    };
    success("overview", data)
}
