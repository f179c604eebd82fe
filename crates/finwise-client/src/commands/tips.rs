use std::path::Path;

use crate::ClientResult;
use crate::commands::common::open_session;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{TipListData, TipReadData, TipView};

#[derive(Debug, Default)]
pub struct TipListOptions<'a> {
    pub unread_only: bool,
    pub limit: Option<usize>,
    pub home_override: Option<&'a Path>,
    pub user_override: Option<&'a str>,
}

#[derive(Debug, Default)]
pub struct TipReadOptions<'a> {
    pub tip_id: String,
    pub home_override: Option<&'a Path>,
    pub user_override: Option<&'a str>,
}

pub fn list(options: TipListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let session = open_session(options.home_override, options.user_override)?;
    let limit = options.limit.unwrap_or(usize::MAX);
    let rows = session
        .tips()
        .iter()
        .filter(|tip| !options.unread_only || !tip.is_read)
        .take(limit)
        .map(TipView::from)
        .collect();
    let data = TipListData {
        unread_only: options.unread_only,
        rows,
    };
    success("tip list", data)
}

pub fn read(options: TipReadOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let mut session = open_session(options.home_override, options.user_override)?;
    let tip = session.mark_tip_read(&options.tip_id)?;
    success(
        "tip read",
        TipReadData {
            tip: TipView::from(&tip),
        },
    )
}
