mod cli;
mod dispatch;
mod logging;
mod output;
mod stdout_io;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use finwise_client::ClientError;
use stdout_io::write_stdout_text;

const ROOT_HELP: &str = "FinWise - budgets, spending and savings goals

Usage:
  finwise <command>

Start here:
  finwise demo seed
  finwise overview
  finwise --help
";

const TOP_LEVEL_HELP: &str = "FinWise - budgets, spending and savings goals

USAGE: finwise <command> [--json] [--user <name>]

Try it:
  finwise demo seed                                       Seed a sample household
  finwise overview                                        Budgets, cash flow, goals and tips at a glance

Track spending:
  finwise transaction add --amount 85.42 --category food --description \"Groceries\"
  finwise transaction list --limit 10                     Newest transactions first
  finwise transaction import --dry-run <path>             Validate a JSON or CSV file without writing
  finwise transaction import <path>                       Import every row, or none

Budgets:
  finwise budget create --category food --limit 600       Monthly unless --period is given
  finwise budget summary                                  Spent, remaining and usage per budget

Savings goals:
  finwise goal create --name \"Emergency Fund\" --target 10000
  finwise goal contribute <goal-id> <amount>              Add to the saved total
  finwise goal set <goal-id> <amount>                     Replace the saved total
  finwise goal list                                       Progress toward every goal

Tips:
  finwise tip list --unread                               Most relevant first
  finwise tip read <tip-id>                               Mark a tip as read

Every command accepts --json for the machine-readable envelope and
--user <name> to act on another user's data (default: FINWISE_USER or `local`).
The ledger lives in FINWISE_HOME (default ~/.finwise).
";

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_text(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let parsed = cli::Cli::try_parse();
    let cli = match parsed {
        Ok(value) => value,
        Err(err) => {
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                let text = if is_top_level_help_request(&raw_args) {
                    TOP_LEVEL_HELP.to_string()
                } else {
                    err.to_string()
                };
                if write_stdout_text(&text).is_err() {
                    return Err(ExitCode::from(2));
                }
                return Ok(ExitCode::SUCCESS);
            }
            let command_hint = if matches!(
                err.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::InvalidValue
                    | ErrorKind::ValueValidation
                    | ErrorKind::WrongNumberOfValues
                    | ErrorKind::UnknownArgument
                    | ErrorKind::InvalidSubcommand
            ) {
                command_path_from_args(&raw_args)
            } else {
                None
            };
            let clean_message = strip_clap_boilerplate(&err.to_string());
            let parse_error =
                ClientError::invalid_argument_for_command(&clean_message, command_hint.as_deref());
            let mode = infer_requested_output_mode(&raw_args);
            if output::print_failure(&parse_error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            return Err(ExitCode::from(1));
        }
    };

    logging::init_logging();
    let mode = output::mode_for_cli(&cli);
    match dispatch::dispatch(&cli) {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            tracing::debug!(code = %error.code, "command failed");
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args.len() == 2 && matches!(raw_args[1].as_str(), "--help" | "-h")
}

/// Drops clap's trailing usage and "For more information" lines so the
/// "What to do next" block is the only guidance.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed.trim_end().to_string()
}

/// First two non-flag arguments, when they name a known command group.
fn command_path_from_args(raw_args: &[String]) -> Option<String> {
    let mut words = raw_args
        .iter()
        .skip(1)
        .filter(|value| !value.starts_with('-'))
        .map(String::as_str);
    let group = words.next()?;
    if !matches!(
        group,
        "transaction" | "budget" | "goal" | "tip" | "overview" | "demo"
    ) {
        return None;
    }

    let action = words.next().filter(|action| {
        matches!(
            (group, *action),
            ("transaction", "add" | "list" | "import")
                | ("budget", "create" | "list" | "summary")
                | ("goal", "create" | "list" | "contribute" | "set")
                | ("tip", "list" | "read")
                | ("demo", "seed")
        )
    });
    Some(match action {
        Some(action) => format!("{group} {action}"),
        None => group.to_string(),
    })
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if is_internal_error(error) {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}

fn is_internal_error(error: &ClientError) -> bool {
    error.code.starts_with("internal_")
        || matches!(
            error.code.as_str(),
            "ledger_init_permission_denied"
                | "ledger_locked"
                | "ledger_corrupt"
                | "migration_failed"
                | "ledger_init_failed"
        )
}

#[cfg(test)]
mod tests {
    use finwise_client::ClientError;

    use super::{command_path_from_args, is_internal_error, strip_clap_boilerplate};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn command_hint_keeps_group_and_known_action() {
        assert_eq!(
            command_path_from_args(&args(&["finwise", "goal", "contribute", "goal_1"])),
            Some("goal contribute".to_string())
        );
        assert_eq!(
            command_path_from_args(&args(&["finwise", "budget", "--json", "nonsense"])),
            Some("budget".to_string())
        );
        assert_eq!(command_path_from_args(&args(&["finwise", "import"])), None);
    }

    #[test]
    fn clap_usage_tail_is_removed() {
        let cleaned =
            strip_clap_boilerplate("error: missing --amount\n\nUsage: finwise transaction add");
        assert_eq!(cleaned, "error: missing --amount");
    }

    #[test]
    fn storage_errors_are_internal() {
        assert!(is_internal_error(&ClientError::new(
            "ledger_locked",
            "busy",
            Vec::new()
        )));
        assert!(!is_internal_error(&ClientError::goal_not_found("goal_1")));
    }
}
