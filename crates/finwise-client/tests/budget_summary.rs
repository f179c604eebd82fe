mod support;

use finwise_client::budget::{compute_budget_summary, recompute_spent};
use finwise_client::domain::{Budget, Category, NewBudget, Period, Transaction};
use rusqlite::Connection;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use support::finance_testkit::{day, expense, income, open_session, temp_home};

fn budget(id: &str, category: Category, limit: Decimal) -> Budget {
    Budget {
        id: id.to_string(),
        user_id: "user1".to_string(),
        category,
        limit,
        period: Period::Monthly,
        start_date: day(2023, 4, 1),
        is_active: true,
        current_spent: Decimal::ZERO,
    }
}

fn transaction(id: &str, category: Category, amount: Decimal, is_income: bool) -> Transaction {
    Transaction {
        id: id.to_string(),
        user_id: "user1".to_string(),
        amount,
        date: day(2023, 4, 2),
        description: format!("txn {id}"),
        category,
        is_income,
        is_recurring: false,
        recurrence: None,
    }
}

fn new_budget(category: Category, limit: Decimal) -> NewBudget {
    NewBudget {
        category,
        limit,
        period: Period::Monthly,
        start_date: day(2023, 4, 1),
    }
}

#[test]
fn food_budget_reports_spent_remaining_and_percent() {
    let transactions = vec![
        transaction("t1", Category::Food, dec!(50), false),
        transaction("t2", Category::Food, dec!(100), false),
        transaction("t3", Category::Food, dec!(200), true),
    ];
    let summary = compute_budget_summary(&transactions, &[budget("b1", Category::Food, dec!(300))]);

    assert_eq!(summary.total_budget, dec!(300));
    assert_eq!(summary.total_spent, dec!(150));
    assert_eq!(summary.remaining, dec!(150));
    assert_eq!(summary.percent_used, dec!(50));
    assert_eq!(summary.categories[0].spent, dec!(150));
}

#[test]
fn total_spent_sums_matching_outflows_per_budget() {
    let transactions = vec![
        transaction("t1", Category::Housing, dec!(1200), false),
        transaction("t2", Category::Food, dec!(85.42), false),
        transaction("t3", Category::Income, dec!(4500), true),
        transaction("t4", Category::Food, dec!(14.58), false),
    ];
    let budgets = vec![
        budget("b1", Category::Housing, dec!(1500)),
        budget("b2", Category::Food, dec!(600)),
    ];
    let summary = compute_budget_summary(&transactions, &budgets);

    assert_eq!(summary.total_spent, dec!(1300));
    assert_eq!(summary.total_budget, dec!(2100));
    assert_eq!(summary.remaining, dec!(800));
}

#[test]
fn no_budgets_means_zero_percent() {
    let transactions = vec![transaction("t1", Category::Food, dec!(40), false)];
    let summary = compute_budget_summary(&transactions, &[]);

    assert_eq!(summary.total_budget, Decimal::ZERO);
    assert_eq!(summary.total_spent, Decimal::ZERO);
    assert_eq!(summary.percent_used, Decimal::ZERO);
    assert!(summary.categories.is_empty());
}

#[test]
fn transactions_outside_budgeted_categories_change_nothing() {
    let budgets = vec![budget("b1", Category::Food, dec!(300))];
    let base = vec![transaction("t1", Category::Food, dec!(75), false)];
    let mut with_unbudgeted = base.clone();
    with_unbudgeted.push(transaction("t2", Category::Entertainment, dec!(999), false));

    assert_eq!(
        compute_budget_summary(&base, &budgets),
        compute_budget_summary(&with_unbudgeted, &budgets)
    );
}

#[test]
fn recomputing_refreshed_budgets_is_idempotent() {
    let transactions = vec![
        transaction("t1", Category::Food, dec!(20), false),
        transaction("t2", Category::Shopping, dec!(35.10), false),
    ];
    let budgets = vec![
        budget("b1", Category::Food, dec!(300)),
        budget("b2", Category::Shopping, dec!(100)),
    ];

    let first = recompute_spent(&transactions, &budgets);
    let second = recompute_spent(&transactions, &first);
    assert_eq!(first, second);
    assert_eq!(
        compute_budget_summary(&transactions, &budgets),
        compute_budget_summary(&transactions, &first)
    );
}

#[test]
fn overspent_budget_reports_negative_remaining() {
    let transactions = vec![transaction("t1", Category::Food, dec!(450), false)];
    let summary = compute_budget_summary(&transactions, &[budget("b1", Category::Food, dec!(300))]);

    assert_eq!(summary.remaining, dec!(-150));
    assert_eq!(summary.percent_used, dec!(150));
}

#[test]
fn two_budgets_on_one_category_each_count_the_same_spending() {
    let transactions = vec![transaction("t1", Category::Food, dec!(60), false)];
    let budgets = vec![
        budget("b1", Category::Food, dec!(300)),
        budget("b2", Category::Food, dec!(100)),
    ];
    let summary = compute_budget_summary(&transactions, &budgets);

    assert_eq!(summary.categories[0].spent, dec!(60));
    assert_eq!(summary.categories[1].spent, dec!(60));
    assert_eq!(summary.total_spent, dec!(120));
}

#[test]
fn session_recomputes_after_each_transaction_and_budget() {
    let home = temp_home("finwise-budget-session");
    assert!(home.is_ok());
    if let Ok((_dir, home_path)) = home {
        let session = open_session(&home_path, "user1");
        assert!(session.is_ok());
        if let Ok(mut session) = session {
            assert!(session.create_budget(&new_budget(Category::Food, dec!(300))).is_ok());
            assert_eq!(session.summary().total_spent, Decimal::ZERO);

            assert!(session.add_transaction(&expense(Category::Food, dec!(50), "Market")).is_ok());
            assert!(session.add_transaction(&expense(Category::Food, dec!(100), "Dinner")).is_ok());
            assert!(session.add_transaction(&income(Category::Food, dec!(200), "Refund")).is_ok());

            assert_eq!(session.summary().total_spent, dec!(150));
            assert_eq!(session.summary().percent_used, dec!(50));
            assert_eq!(session.budgets()[0].current_spent, dec!(150));
            assert_eq!(session.category_total(Category::Food), dec!(150));
        }
    }
}

#[test]
fn stale_stored_spent_cache_is_corrected_on_load() {
    let home = temp_home("finwise-budget-cache");
    assert!(home.is_ok());
    if let Ok((_dir, home_path)) = home {
        let session = open_session(&home_path, "user1");
        assert!(session.is_ok());
        let mut db_path = home_path.join("ledger.db");
        if let Ok(mut session) = session {
            assert!(session.create_budget(&new_budget(Category::Housing, dec!(1500))).is_ok());
            assert!(session
                .add_transaction(&expense(Category::Housing, dec!(1200), "Rent"))
                .is_ok());
            db_path = session.db_path().to_path_buf();
        }

        let tamper = Connection::open(&db_path);
        assert!(tamper.is_ok());
        if let Ok(conn) = tamper {
            assert!(conn
                .execute("UPDATE budgets SET current_spent = '9999'", [])
                .is_ok());
        }

        let reloaded = open_session(&home_path, "user1");
        assert!(reloaded.is_ok());
        if let Ok(session) = reloaded {
            assert_eq!(session.budgets()[0].current_spent, dec!(1200));
            assert_eq!(session.summary().total_spent, dec!(1200));
        }

        let verify = Connection::open(&db_path);
        assert!(verify.is_ok());
        if let Ok(conn) = verify {
            let stored = conn.query_row("SELECT current_spent FROM budgets", [], |row| {
                row.get::<_, String>(0)
            });
            assert_eq!(stored.ok().as_deref(), Some("1200"));
        }
    }
}

#[test]
fn users_never_see_each_others_spending() {
    let home = temp_home("finwise-budget-users");
    assert!(home.is_ok());
    if let Ok((_dir, home_path)) = home {
        let first = open_session(&home_path, "user1");
        assert!(first.is_ok());
        if let Ok(mut session) = first {
            assert!(session.create_budget(&new_budget(Category::Food, dec!(300))).is_ok());
            assert!(session.add_transaction(&expense(Category::Food, dec!(80), "Lunch")).is_ok());
        }

        let second = open_session(&home_path, "user2");
        assert!(second.is_ok());
        if let Ok(mut session) = second {
            assert!(session.create_budget(&new_budget(Category::Food, dec!(200))).is_ok());
            assert_eq!(session.summary().total_spent, Decimal::ZERO);
            assert_eq!(session.summary().total_budget, dec!(200));
            assert!(session.transactions().is_empty());
        }
    }
}

#[test]
fn invalid_budget_limit_is_rejected_before_writing() {
    let home = temp_home("finwise-budget-invalid");
    assert!(home.is_ok());
    if let Ok((_dir, home_path)) = home {
        let session = open_session(&home_path, "user1");
        assert!(session.is_ok());
        if let Ok(mut session) = session {
            let created = session.create_budget(&new_budget(Category::Food, dec!(-5)));
            assert!(created.is_err());
            if let Err(error) = created {
                assert_eq!(error.code, "validation_failed");
            }
            assert!(session.budgets().is_empty());
        }
    }
}

#[test]
fn tiny_limit_with_huge_spending_saturates_the_percentage() {
    let spent = Decimal::from_i128_with_scale(1_000_000_000_000_000_000_000_000_000, 0);
    let summary = compute_budget_summary(
        &[transaction("t1", Category::Food, spent, false)],
        &[budget("b1", Category::Food, dec!(0.01))],
    );

    assert_eq!(summary.total_spent, spent);
    assert_eq!(summary.percent_used, Decimal::MAX);
    assert_eq!(summary.categories[0].percent_used, Decimal::MAX);
    assert_eq!(summary.remaining, dec!(0.01) - spent);
}

#[test]
fn failed_cache_write_leaves_the_snapshot_untouched() {
    let home = temp_home("finwise-budget-cache-failure");
    assert!(home.is_ok());
    if let Ok((_dir, home_path)) = home {
        let session = open_session(&home_path, "user1");
        assert!(session.is_ok());
        if let Ok(mut session) = session {
            assert!(session.create_budget(&new_budget(Category::Food, dec!(300))).is_ok());
            assert!(session.add_transaction(&expense(Category::Food, dec!(50), "Market")).is_ok());

            let freeze = Connection::open(session.db_path());
            assert!(freeze.is_ok());
            if let Ok(conn) = freeze {
                assert!(conn
                    .execute_batch(
                        "CREATE TRIGGER freeze_spent BEFORE UPDATE OF current_spent ON budgets
                         BEGIN SELECT RAISE(ABORT, 'spent cache frozen'); END;",
                    )
                    .is_ok());
            }

            let added = session.add_transaction(&expense(Category::Food, dec!(25), "Snack"));
            assert!(added.is_err());
            assert_eq!(session.transactions().len(), 1);
            assert_eq!(session.budgets()[0].current_spent, dec!(50));
            assert_eq!(session.summary().total_spent, dec!(50));
        }
    }
}

#[test]
fn loading_an_up_to_date_ledger_does_not_need_the_write_lock() {
    let home = temp_home("finwise-budget-read-only-load");
    assert!(home.is_ok());
    if let Ok((_dir, home_path)) = home {
        let session = open_session(&home_path, "user1");
        assert!(session.is_ok());
        if let Ok(mut session) = session {
            assert!(session.create_budget(&new_budget(Category::Food, dec!(300))).is_ok());
            assert!(session.add_transaction(&expense(Category::Food, dec!(50), "Market")).is_ok());
        }

        let writer = Connection::open(home_path.join("ledger.db"));
        assert!(writer.is_ok());
        if let Ok(conn) = writer {
            assert!(conn.execute_batch("BEGIN IMMEDIATE;").is_ok());

            let reader = open_session(&home_path, "user1");
            assert!(reader.is_ok(), "load failed: {:?}", reader.as_ref().err());
            if let Ok(session) = reader {
                assert_eq!(session.summary().total_spent, dec!(50));
            }

            assert!(conn.execute_batch("ROLLBACK;").is_ok());
        }
    }
}
