pub mod date;
pub mod entities;
pub mod error;
pub mod kinds;
pub mod validate;

pub use entities::{
    AiTip, Budget, NewBudget, NewSavingsGoal, NewTransaction, SavingsGoal, Transaction,
};
pub use error::{DomainError, DomainResult};
pub use kinds::{Category, GoalCategory, Period, Priority};
