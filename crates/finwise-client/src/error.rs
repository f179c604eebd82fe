use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

use crate::contracts::types::{ImportIssue, ImportSummary};
use crate::domain::DomainError;

pub(crate) const IMPORT_HELP_COMMAND: &str = "finwise transaction import --help";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `finwise {cmd} --help` for usage."),
            None => "Run `finwise --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn validation_failed(field: &str, message: &str) -> Self {
        Self::new(
            "validation_failed",
            &format!("`{field}` {message}"),
            vec!["Correct the value and rerun the command.".to_string()],
        )
        .with_data(json!({
            "field": field,
        }))
    }

    pub fn goal_not_found(goal_id: &str) -> Self {
        Self::new(
            "goal_not_found",
            &format!("Goal id `{goal_id}` was not found."),
            vec![
                "Run `finwise goal list` to find a valid goal id.".to_string(),
                "Goals belong to one user; check `--user` or `FINWISE_USER`.".to_string(),
            ],
        )
        .with_data(json!({
            "goal_id": goal_id,
        }))
    }

    pub fn goal_already_completed(goal_id: &str) -> Self {
        Self::new(
            "goal_already_completed",
            &format!("Goal `{goal_id}` is completed; its amount cannot drop below the target."),
            vec![
                "Completed goals stay completed.".to_string(),
                "Create a new goal with `finwise goal create` to keep saving.".to_string(),
            ],
        )
        .with_data(json!({
            "goal_id": goal_id,
        }))
    }

    pub fn tip_not_found(tip_id: &str) -> Self {
        Self::new(
            "tip_not_found",
            &format!("Tip id `{tip_id}` was not found."),
            vec!["Run `finwise tip list` to find a valid tip id.".to_string()],
        )
        .with_data(json!({
            "tip_id": tip_id,
        }))
    }

    pub fn demo_already_seeded(user_id: &str) -> Self {
        Self::new(
            "demo_already_seeded",
            &format!("User `{user_id}` already has ledger data; the demo seed was skipped."),
            vec![
                "Run `finwise overview` to view the existing data.".to_string(),
                "Use `--user <name>` to seed demo data for a fresh user.".to_string(),
            ],
        )
        .with_data(json!({
            "user_id": user_id,
        }))
    }

    pub fn invalid_import_format(message: &str, received_format: &str) -> Self {
        Self::invalid_argument_with_recovery(
            message,
            vec![
                "Provide a supported import format (JSON array or CSV).".to_string(),
                format!("Run `{IMPORT_HELP_COMMAND}` to confirm field requirements."),
            ],
        )
        .with_data(json!({
            "received_format": received_format,
            "supported_formats": ["json_array", "csv"],
            "help_command": IMPORT_HELP_COMMAND,
        }))
    }

    pub fn import_schema_mismatch(expected_headers: Vec<String>, actual_headers: Vec<String>) -> Self {
        Self::new(
            "import_schema_mismatch",
            "CSV headers do not satisfy the import schema.",
            vec![
                "Include all required headers; optional headers may be omitted.".to_string(),
                "Do not include unknown headers.".to_string(),
                "Rerun `finwise transaction import --dry-run <path>`.".to_string(),
            ],
        )
        .with_data(json!({
            "expected_headers": expected_headers,
            "actual_headers": actual_headers,
            "help_command": IMPORT_HELP_COMMAND,
        }))
    }

    pub fn import_validation_failed(summary: ImportSummary, issues: Vec<ImportIssue>) -> Self {
        let issue_count = summary.rows_invalid;
        Self::new(
            "import_validation_failed",
            &format!(
                "Import failed validation: {issue_count} rows need fixes. No rows were written."
            ),
            vec![
                "Fix the listed issues in your source file.".to_string(),
                "Rerun finwise transaction import --dry-run <path>.".to_string(),
                "Then rerun finwise transaction import <path>.".to_string(),
            ],
        )
        .with_data(json!({
            "summary": summary,
            "issues": issues,
            "help_command": IMPORT_HELP_COMMAND,
        }))
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }

    pub fn ledger_init_permission_denied(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "ledger_init_permission_denied",
            &format!("Cannot initialize ledger at `{location}`: {detail}"),
            vec![format!(
                "Grant write access to `{location}` or set `FINWISE_HOME` to a writable directory."
            )],
        )
    }

    pub fn ledger_locked(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "ledger_locked",
            &format!("Ledger database is locked at `{location}`."),
            vec![format!(
                "Close other processes using `{location}` so the lock is released."
            )],
        )
    }

    pub fn ledger_corrupt(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "ledger_corrupt",
            &format!("Ledger database appears corrupt at `{location}`."),
            vec![format!(
                "Replace `{location}` with a valid SQLite ledger file or restore from backup."
            )],
        )
    }

    /// A stored value that does not convert into its domain type.
    pub fn invalid_stored_value(path: &Path, table: &str, column: &str, value: &str) -> Self {
        Self::ledger_corrupt(path).with_data(json!({
            "table": table,
            "column": column,
            "value": value,
        }))
    }

    pub fn migration_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "migration_failed",
            &format!("Ledger migration failed at `{location}`: {detail}"),
            vec!["Resolve conflicting schema objects referenced in the error details.".to_string()],
        )
    }

    pub fn ledger_init_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "ledger_init_failed",
            &format!("Ledger initialization failed at `{location}`: {detail}"),
            Vec::new(),
        )
    }
}

impl From<DomainError> for ClientError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::NotFound { id, .. } => Self::goal_not_found(&id),
            DomainError::Validation { field, message } => Self::validation_failed(field, &message),
            DomainError::GoalAlreadyCompleted { goal_id } => Self::goal_already_completed(&goal_id),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
