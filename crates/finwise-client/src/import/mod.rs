//! Transaction import: resolve a source, parse JSON or CSV, validate every
//! row, then write the whole batch or nothing.

pub(crate) mod input;
pub(crate) mod parse;
pub(crate) mod validate;

use crate::contracts::types::{ImportIssue, ImportSummary};
use crate::error::IMPORT_HELP_COMMAND;
use crate::session::FinanceSession;
use crate::store::new_id;
use crate::{ClientError, ClientResult};

pub(crate) const REQUIRED_IMPORT_FIELDS: [&str; 4] = ["date", "amount", "description", "category"];
pub(crate) const OPTIONAL_IMPORT_FIELDS: [&str; 3] = ["is_income", "is_recurring", "recurrence"];

#[derive(Debug, Clone)]
pub(crate) struct ImportExecutionResult {
    pub dry_run: bool,
    pub import_id: Option<String>,
    pub message: String,
    pub source_kind: &'static str,
    pub summary: ImportSummary,
    pub issues: Vec<ImportIssue>,
}

pub(crate) fn execute(
    session: &mut FinanceSession,
    path: Option<String>,
    dry_run: bool,
    stdin_override: Option<String>,
) -> ClientResult<ImportExecutionResult> {
    let resolved_source = input::resolve_source(path, stdin_override)?;
    let parsed_rows = parse::parse_source(&resolved_source.content)?;
    let validated = validate::validate_rows(parsed_rows)?;

    if dry_run {
        log::debug!(
            "import dry run validated {} rows",
            validated.summary.rows_valid
        );
        return Ok(ImportExecutionResult {
            dry_run: true,
            import_id: None,
            message: "Validation passed. No rows were written.".to_string(),
            source_kind: resolved_source.source_kind.as_str(),
            summary: validated.summary,
            issues: Vec::new(),
        });
    }

    let import_id = new_id("imp");
    let inserted = session.import_transactions(&validated.rows, &import_id)?;
    let summary = ImportSummary {
        inserted: inserted.len() as i64,
        ..validated.summary
    };

    Ok(ImportExecutionResult {
        dry_run: false,
        import_id: Some(import_id),
        message: "Import completed successfully.".to_string(),
        source_kind: resolved_source.source_kind.as_str(),
        summary,
        issues: Vec::new(),
    })
}

pub(crate) fn invalid_input_error(message: &str) -> ClientError {
    ClientError::invalid_argument_with_recovery(
        message,
        vec![
            "Provide JSON array or CSV input via path or stdin.".to_string(),
            format!("Run `{IMPORT_HELP_COMMAND}` to confirm import field requirements."),
        ],
    )
}

pub(crate) fn expected_headers() -> Vec<String> {
    REQUIRED_IMPORT_FIELDS
        .iter()
        .chain(OPTIONAL_IMPORT_FIELDS.iter())
        .map(|value| value.to_string())
        .collect()
}
