use thiserror::Error;

/// Failures raised by the pure domain rules. None of them are transient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("{entity} `{id}` was not found.")]
    NotFound { entity: &'static str, id: String },
    #[error("{field}: {message}")]
    Validation { field: &'static str, message: String },
    #[error("Goal `{goal_id}` is already completed and cannot drop below its target.")]
    GoalAlreadyCompleted { goal_id: String },
}

impl DomainError {
    pub fn goal_not_found(goal_id: &str) -> Self {
        Self::NotFound {
            entity: "Goal",
            id: goal_id.to_string(),
        }
    }

    pub fn validation(field: &'static str, message: &str) -> Self {
        Self::Validation {
            field,
            message: message.to_string(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
