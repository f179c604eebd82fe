mod budget_text;
mod demo_text;
mod error_text;
mod format;
mod goals_text;
mod json;
mod mode;
mod overview_text;
mod tips_text;
mod transactions_text;

use std::io;

use finwise_client::{ClientError, SuccessEnvelope};

use crate::stdout_io::write_stdout_line;

pub use mode::{OutputMode, mode_for_cli};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    let data = &success.data;
    match success.command.as_str() {
        "transaction add" => transactions_text::render_transaction_add(data),
        "transaction list" => transactions_text::render_transaction_list(data),
        "transaction import" => transactions_text::render_transaction_import(data),
        "budget create" => budget_text::render_budget_create(data),
        "budget list" => budget_text::render_budget_list(data),
        "budget summary" => budget_text::render_budget_summary(data),
        "goal create" => goals_text::render_goal_create(data),
        "goal list" => goals_text::render_goal_list(data),
        "goal contribute" | "goal set" => goals_text::render_goal_update(data),
        "tip list" => tips_text::render_tip_list(data),
        "tip read" => tips_text::render_tip_read(data),
        "overview" => overview_text::render_overview(data),
        "demo seed" => demo_text::render_demo_seed(data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}
