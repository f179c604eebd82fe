use finwise_client::commands::budgets::{self, BudgetCreateOptions, BudgetReadOptions};
use finwise_client::commands::demo::{self, DemoSeedOptions};
use finwise_client::commands::goals::{self, GoalAmountOptions, GoalCreateOptions, GoalListOptions};
use finwise_client::commands::overview::{self, OverviewOptions};
use finwise_client::commands::tips::{self, TipListOptions, TipReadOptions};
use finwise_client::commands::transactions::{
    self, TransactionAddOptions, TransactionImportOptions, TransactionListOptions,
};
use finwise_client::{ClientResult, SuccessEnvelope};

use crate::cli::{
    BudgetCommand, Cli, Commands, DemoCommand, GoalCommand, IsoDate, TipCommand,
    TransactionCommand,
};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    let user = cli.user.as_deref();
    match &cli.command {
        Commands::Transaction { command } => dispatch_transaction(command, user),
        Commands::Budget { command } => dispatch_budget(command, user),
        Commands::Goal { command } => dispatch_goal(command, user),
        Commands::Tip { command } => match command {
            TipCommand::List { unread, limit } => tips::list(TipListOptions {
                unread_only: *unread,
                limit: *limit,
                home_override: None,
                user_override: user,
            }),
            TipCommand::Read { tip_id } => tips::read(TipReadOptions {
                tip_id: tip_id.clone(),
                home_override: None,
                user_override: user,
            }),
        },
        Commands::Overview => overview::run(OverviewOptions {
            home_override: None,
            user_override: user,
        }),
        Commands::Demo {
            command: DemoCommand::Seed,
        } => demo::seed(DemoSeedOptions {
            home_override: None,
            user_override: user,
        }),
    }
}

fn dispatch_transaction(
    command: &TransactionCommand,
    user: Option<&str>,
) -> ClientResult<SuccessEnvelope> {
    match command {
        TransactionCommand::Add {
            amount,
            category,
            description,
            date,
            income,
            recurring,
        } => transactions::add(TransactionAddOptions {
            amount: amount.clone(),
            category: category.clone(),
            description: description.clone(),
            date: date.as_ref().map(date_string),
            is_income: *income,
            recurrence: recurring.clone(),
            home_override: None,
            user_override: user,
        }),
        TransactionCommand::List { limit } => transactions::list(TransactionListOptions {
            limit: *limit,
            home_override: None,
            user_override: user,
        }),
        TransactionCommand::Import { dry_run, path } => {
            transactions::import(TransactionImportOptions {
                path: path.clone(),
                dry_run: *dry_run,
                home_override: None,
                user_override: user,
                stdin_override: None,
            })
        }
    }
}

fn dispatch_budget(command: &BudgetCommand, user: Option<&str>) -> ClientResult<SuccessEnvelope> {
    let read_options = || BudgetReadOptions {
        home_override: None,
        user_override: user,
    };
    match command {
        BudgetCommand::Create {
            category,
            limit,
            period,
            start_date,
        } => budgets::create(BudgetCreateOptions {
            category: category.clone(),
            limit: limit.clone(),
            period: period.clone(),
            start_date: start_date.as_ref().map(date_string),
            home_override: None,
            user_override: user,
        }),
        BudgetCommand::List => budgets::list(read_options()),
        BudgetCommand::Summary => budgets::summary(read_options()),
    }
}

fn dispatch_goal(command: &GoalCommand, user: Option<&str>) -> ClientResult<SuccessEnvelope> {
    match command {
        GoalCommand::Create {
            name,
            target,
            category,
            priority,
            deadline,
            image_url,
        } => goals::create(GoalCreateOptions {
            name: name.clone(),
            target: target.clone(),
            category: category.clone(),
            priority: priority.clone(),
            deadline: deadline.as_ref().map(date_string),
            image_url: image_url.clone(),
            home_override: None,
            user_override: user,
        }),
        GoalCommand::List => goals::list(GoalListOptions {
            home_override: None,
            user_override: user,
        }),
        GoalCommand::Contribute { goal_id, amount } => goals::contribute(GoalAmountOptions {
            goal_id: goal_id.clone(),
            amount: amount.clone(),
            home_override: None,
            user_override: user,
        }),
        GoalCommand::Set { goal_id, amount } => goals::set_amount(GoalAmountOptions {
            goal_id: goal_id.clone(),
            amount: amount.clone(),
            home_override: None,
            user_override: user,
        }),
    }
}

fn date_string(date: &IsoDate) -> String {
    date.as_str().to_string()
}
