use std::path::Path;

use crate::ClientResult;
use crate::commands::common::{open_session, parse_amount, parse_choice, parse_date};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{GoalCreateData, GoalListData, GoalUpdateData, GoalView};
use crate::domain::{GoalCategory, NewSavingsGoal, Priority};

#[derive(Debug, Default)]
pub struct GoalCreateOptions<'a> {
    pub name: String,
    pub target: String,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub deadline: Option<String>,
    pub image_url: Option<String>,
    pub home_override: Option<&'a Path>,
    pub user_override: Option<&'a str>,
}

#[derive(Debug, Default)]
pub struct GoalListOptions<'a> {
    pub home_override: Option<&'a Path>,
    pub user_override: Option<&'a str>,
}

/// Input for both goal mutations. `amount` is incremental for `contribute`
/// and absolute for `set_amount`.
#[derive(Debug, Default)]
pub struct GoalAmountOptions<'a> {
    pub goal_id: String,
    pub amount: String,
    pub home_override: Option<&'a Path>,
    pub user_override: Option<&'a str>,
}

pub fn create(options: GoalCreateOptions<'_>) -> ClientResult<SuccessEnvelope> {
    const COMMAND: &str = "goal create";
    let new = NewSavingsGoal {
        name: options.name,
        target_amount: parse_amount(COMMAND, "--target", &options.target)?,
        deadline: match options.deadline.as_deref() {
            Some(raw) => Some(parse_date(COMMAND, "--deadline", raw)?),
            None => None,
        },
        category: match options.category.as_deref() {
            Some(raw) => parse_choice(
                COMMAND,
                "--category",
                raw,
                &GoalCategory::ALL,
                GoalCategory::as_str,
                GoalCategory::parse,
            )?,
            None => GoalCategory::Other,
        },
        priority: match options.priority.as_deref() {
            Some(raw) => parse_choice(
                COMMAND,
                "--priority",
                raw,
                &Priority::ALL,
                Priority::as_str,
                Priority::parse,
            )?,
            None => Priority::Medium,
        },
        image_url: options
            .image_url
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty()),
    };

    let mut session = open_session(options.home_override, options.user_override)?;
    let goal = session.create_goal(&new)?;
    success(
        COMMAND,
        GoalCreateData {
            goal: GoalView::from(&goal),
        },
    )
}

pub fn list(options: GoalListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let session = open_session(options.home_override, options.user_override)?;
    let data = GoalListData {
        rows: session.goals().iter().map(GoalView::from).collect(),
    };
    success("goal list", data)
}

pub fn contribute(options: GoalAmountOptions<'_>) -> ClientResult<SuccessEnvelope> {
    const COMMAND: &str = "goal contribute";
    let amount = parse_amount(COMMAND, "<amount>", &options.amount)?;
    let mut session = open_session(options.home_override, options.user_override)?;
    let update = session.contribute(&options.goal_id, amount)?;
    success(COMMAND, GoalUpdateData::new("contribute", amount, &update))
}

pub fn set_amount(options: GoalAmountOptions<'_>) -> ClientResult<SuccessEnvelope> {
    const COMMAND: &str = "goal set";
    let amount = parse_amount(COMMAND, "<amount>", &options.amount)?;
    let mut session = open_session(options.home_override, options.user_override)?;
    let update = session.set_goal_amount(&options.goal_id, amount)?;
    success(COMMAND, GoalUpdateData::new("set", amount, &update))
}
