use rust_decimal::Decimal;

use crate::domain::validate::{require_non_negative, require_positive, require_within_bound};
use crate::domain::{DomainError, DomainResult, SavingsGoal};

/// Result of a goal mutation. `just_completed` is true only on the
/// contribution that moves the goal from active to completed.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalUpdate {
    pub goal: SavingsGoal,
    pub just_completed: bool,
}

/// Adds `amount` to the goal's running total.
pub fn contribute(goal: &SavingsGoal, amount: Decimal) -> DomainResult<GoalUpdate> {
    require_positive("amount", amount)?;
    require_within_bound("amount", amount)?;
    let new_amount = goal
        .current_amount
        .checked_add(amount)
        .ok_or_else(|| DomainError::validation("amount", "would overflow the saved total."))?;
    require_within_bound("current_amount", new_amount)?;
    Ok(apply_new_amount(goal, new_amount))
}

/// Replaces the goal's running total with `amount`.
///
/// Completion is terminal, so a completed goal cannot be set below its target.
pub fn set_current_amount(goal: &SavingsGoal, amount: Decimal) -> DomainResult<GoalUpdate> {
    require_non_negative("amount", amount)?;
    require_within_bound("amount", amount)?;
    if goal.is_completed && amount < goal.target_amount {
        return Err(DomainError::GoalAlreadyCompleted {
            goal_id: goal.id.clone(),
        });
    }
    Ok(apply_new_amount(goal, amount))
}

pub fn contribute_to_goal(
    goals: &[SavingsGoal],
    goal_id: &str,
    amount: Decimal,
) -> DomainResult<GoalUpdate> {
    contribute(find_goal(goals, goal_id)?, amount)
}

pub fn set_goal_amount(
    goals: &[SavingsGoal],
    goal_id: &str,
    amount: Decimal,
) -> DomainResult<GoalUpdate> {
    set_current_amount(find_goal(goals, goal_id)?, amount)
}

pub fn find_goal<'a>(goals: &'a [SavingsGoal], goal_id: &str) -> DomainResult<&'a SavingsGoal> {
    goals
        .iter()
        .find(|goal| goal.id == goal_id)
        .ok_or_else(|| DomainError::goal_not_found(goal_id))
}

fn apply_new_amount(goal: &SavingsGoal, new_amount: Decimal) -> GoalUpdate {
    let was_completed = goal.is_completed;
    let is_completed = new_amount >= goal.target_amount;
    let updated = SavingsGoal {
        current_amount: new_amount,
        is_completed,
        ..goal.clone()
    };
    GoalUpdate {
        goal: updated,
        just_completed: !was_completed && is_completed,
    }
}
