use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsoDate(pub String);

impl IsoDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn parse_iso_date(value: &str) -> Result<IsoDate, String> {
    if value.len() != 10 {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    let bytes = value.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        return Err("date must use valid calendar values".to_string());
    }

    Ok(IsoDate(value.to_string()))
}

/// Extended help shown after `finwise transaction import --help`.
pub const TRANSACTION_IMPORT_AFTER_HELP: &str = "\
How import works:
  <path> is a local JSON or CSV file. Use `-` to read stdin.
  Example: cat april.json | finwise transaction import --dry-run -
  Every row is validated first. If any row has an issue, nothing is written.

What to do next:
  1. Run `finwise transaction import --dry-run <path>` and fix any reported issues.
  2. Run `finwise transaction import <path>` once the dry run passes.
  3. Run `finwise budget summary` to see the refreshed spending totals.

Import fields:
  date (required)         YYYY-MM-DD
  amount (required)       non-negative, at most 2 decimal places
  description (required)  free text
  category (required)     housing, food, transportation, utilities, insurance,
                          healthcare, savings, personal, entertainment,
                          education, shopping, income, other
  is_income (optional)    true/false; defaults to true only for `income`
  is_recurring (optional) true/false
  recurrence (optional)   daily, weekly, monthly, yearly

  JSON example:
  [
    {\"date\": \"2023-04-02\", \"amount\": 85.42, \"description\": \"Grocery shopping\", \"category\": \"food\"}
  ]

  CSV example:
  date,amount,description,category,is_income,is_recurring,recurrence
  2023-04-01,1200,Rent payment,housing,false,true,monthly
";

#[derive(Debug, Parser)]
#[command(
    name = "finwise",
    version,
    about = "budgets, spending and savings goals from your terminal",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Print the machine-readable JSON envelope instead of text
    #[arg(long, global = true)]
    pub json: bool,
    /// Act on this user's ledger data (defaults to FINWISE_USER or `local`)
    #[arg(long, global = true, value_name = "name")]
    pub user: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record, list and import transactions
    #[command(arg_required_else_help = true)]
    Transaction {
        #[command(subcommand)]
        command: TransactionCommand,
    },
    /// Create budgets and see how spending tracks against them
    #[command(arg_required_else_help = true)]
    Budget {
        #[command(subcommand)]
        command: BudgetCommand,
    },
    /// Create savings goals and record progress toward them
    #[command(arg_required_else_help = true)]
    Goal {
        #[command(subcommand)]
        command: GoalCommand,
    },
    /// Read stored savings tips
    #[command(arg_required_else_help = true)]
    Tip {
        #[command(subcommand)]
        command: TipCommand,
    },
    /// Budget summary, cash flow, recent activity, goals and tips at a glance
    Overview,
    /// Write a sample household into the ledger
    #[command(arg_required_else_help = true)]
    Demo {
        #[command(subcommand)]
        command: DemoCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum TransactionCommand {
    /// Record one transaction
    Add {
        /// Amount as a non-negative decimal, e.g. 85.42
        #[arg(long)]
        amount: String,
        /// Spending category
        #[arg(long)]
        category: String,
        /// Free-text description
        #[arg(long)]
        description: String,
        /// Transaction date (YYYY-MM-DD, defaults to today)
        #[arg(long, value_parser = parse_iso_date)]
        date: Option<IsoDate>,
        /// Mark the transaction as income
        #[arg(long)]
        income: bool,
        /// Recurrence period: daily, weekly, monthly or yearly
        #[arg(long, value_name = "period")]
        recurring: Option<String>,
    },
    /// List transactions, newest first
    List {
        /// Show at most this many rows
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Import transactions from JSON or CSV
    #[command(after_long_help = TRANSACTION_IMPORT_AFTER_HELP)]
    Import {
        /// Validate only; nothing is written
        #[arg(long)]
        dry_run: bool,
        /// File path, or `-` for stdin
        path: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum BudgetCommand {
    /// Create a budget for one category
    Create {
        /// Spending category
        #[arg(long)]
        category: String,
        /// Spending limit for the period
        #[arg(long)]
        limit: String,
        /// Budget period: daily, weekly, monthly or yearly
        #[arg(long)]
        period: Option<String>,
        /// First day of the budget (YYYY-MM-DD, defaults to today)
        #[arg(long, value_parser = parse_iso_date)]
        start_date: Option<IsoDate>,
    },
    /// List budgets with their spent amounts
    List,
    /// Budget totals, per-category usage and cash flow
    Summary,
}

#[derive(Debug, Subcommand)]
pub enum GoalCommand {
    /// Create a savings goal
    Create {
        /// Goal name
        #[arg(long)]
        name: String,
        /// Target amount
        #[arg(long)]
        target: String,
        /// Goal category: emergency, retirement, education, home, vehicle, vacation or other
        #[arg(long)]
        category: Option<String>,
        /// Priority: low, medium or high
        #[arg(long)]
        priority: Option<String>,
        /// Target date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        deadline: Option<IsoDate>,
        /// Image shown alongside the goal
        #[arg(long)]
        image_url: Option<String>,
    },
    /// List goals with progress
    List,
    /// Add an amount to a goal's saved total
    Contribute {
        goal_id: String,
        amount: String,
    },
    /// Replace a goal's saved total
    Set {
        goal_id: String,
        amount: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum TipCommand {
    /// List tips, most relevant first
    List {
        /// Only tips not yet read
        #[arg(long)]
        unread: bool,
        /// Show at most this many tips
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Mark a tip as read
    Read { tip_id: String },
}

#[derive(Debug, Subcommand)]
pub enum DemoCommand {
    /// Seed sample transactions, budgets, goals and a tip
    Seed,
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::{BudgetCommand, Commands, GoalCommand, TransactionCommand, parse_from};

    #[test]
    fn parse_command_paths() {
        let parsed = parse_from([
            "finwise",
            "transaction",
            "add",
            "--amount",
            "85.42",
            "--category",
            "food",
            "--description",
            "Grocery shopping",
            "--date",
            "2023-04-02",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(matches!(
                cli.command,
                Commands::Transaction {
                    command: TransactionCommand::Add { income: false, .. }
                }
            ));
        }

        let summary = parse_from(["finwise", "budget", "summary"]);
        assert!(summary.is_ok());
        if let Ok(cli) = summary {
            assert!(matches!(
                cli.command,
                Commands::Budget {
                    command: BudgetCommand::Summary
                }
            ));
        }
    }

    #[test]
    fn goal_amount_commands_take_positional_arguments() {
        let parsed = parse_from(["finwise", "goal", "contribute", "goal_1", "60"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            match cli.command {
                Commands::Goal {
                    command: GoalCommand::Contribute { goal_id, amount },
                } => {
                    assert_eq!(goal_id, "goal_1");
                    assert_eq!(amount, "60");
                }
                _ => panic!("expected goal contribute"),
            }
        }
    }

    #[test]
    fn global_flags_are_accepted_after_the_subcommand() {
        let parsed = parse_from(["finwise", "overview", "--json", "--user", "sam"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(cli.json);
            assert_eq!(cli.user.as_deref(), Some("sam"));
        }
    }

    #[test]
    fn invalid_dates_are_rejected_by_the_parser() {
        let parsed = parse_from([
            "finwise",
            "budget",
            "create",
            "--category",
            "food",
            "--limit",
            "300",
            "--start-date",
            "2023-02-30",
        ]);
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.kind(), ErrorKind::ValueValidation);
        }
    }

    #[test]
    fn missing_subcommand_shows_help() {
        let parsed = parse_from(["finwise", "goal"]);
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(
                error.kind(),
                ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            );
        }
    }
}
