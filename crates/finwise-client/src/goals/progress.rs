use rust_decimal::Decimal;

use crate::budget::summary::percent_of;
use crate::domain::SavingsGoal;

#[derive(Debug, Clone, PartialEq)]
pub struct GoalProgress {
    /// Capped at 100 even when the goal is overfunded.
    pub percent: Decimal,
    /// Floored at 0.
    pub remaining: Decimal,
}

pub fn goal_progress(goal: &SavingsGoal) -> GoalProgress {
    let percent = percent_of(goal.current_amount, goal.target_amount).min(Decimal::ONE_HUNDRED);
    let remaining = goal
        .target_amount
        .saturating_sub(goal.current_amount)
        .max(Decimal::ZERO);
    GoalProgress { percent, remaining }
}
