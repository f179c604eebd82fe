//! Savings goal ledger. Completion is derived from the running total and,
//! once reached, never reverts.

pub mod ledger;
pub mod progress;

pub use ledger::{
    GoalUpdate, contribute, contribute_to_goal, find_goal, set_current_amount, set_goal_amount,
};
pub use progress::{GoalProgress, goal_progress};
