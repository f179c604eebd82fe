use rust_decimal::Decimal;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::{NewBudget, NewSavingsGoal, NewTransaction};

const MAX_AMOUNT_SCALE: u32 = 2;

/// Largest single amount accepted anywhere: one trillion.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

pub fn validate_new_transaction(transaction: &NewTransaction) -> DomainResult<()> {
    require_non_negative("amount", transaction.amount)?;
    require_within_bound("amount", transaction.amount)?;
    require_cent_precision("amount", transaction.amount)
}

pub fn validate_new_budget(budget: &NewBudget) -> DomainResult<()> {
    require_positive("limit", budget.limit)?;
    require_within_bound("limit", budget.limit)?;
    require_cent_precision("limit", budget.limit)
}

pub fn validate_new_goal(goal: &NewSavingsGoal) -> DomainResult<()> {
    if goal.name.trim().is_empty() {
        return Err(DomainError::validation(
            "name",
            "Goal name must be present and non-empty.",
        ));
    }
    require_positive("target_amount", goal.target_amount)?;
    require_within_bound("target_amount", goal.target_amount)?;
    require_cent_precision("target_amount", goal.target_amount)
}

pub fn require_positive(field: &'static str, value: Decimal) -> DomainResult<()> {
    if value <= Decimal::ZERO {
        return Err(DomainError::validation(
            field,
            &format!("must be greater than 0; got {value}."),
        ));
    }
    Ok(())
}

pub fn require_non_negative(field: &'static str, value: Decimal) -> DomainResult<()> {
    if value < Decimal::ZERO {
        return Err(DomainError::validation(
            field,
            &format!("must not be negative; got {value}."),
        ));
    }
    Ok(())
}

pub fn require_within_bound(field: &'static str, value: Decimal) -> DomainResult<()> {
    if value.abs() > MAX_AMOUNT {
        return Err(DomainError::validation(
            field,
            &format!("must not exceed {MAX_AMOUNT}; got {value}."),
        ));
    }
    Ok(())
}

pub fn require_cent_precision(field: &'static str, value: Decimal) -> DomainResult<()> {
    let scale = value.normalize().scale();
    if scale > MAX_AMOUNT_SCALE {
        return Err(DomainError::validation(
            field,
            &format!("must use at most 2 decimal places; got {scale}."),
        ));
    }
    Ok(())
}
