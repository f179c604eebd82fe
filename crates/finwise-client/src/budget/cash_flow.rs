use rust_decimal::Decimal;

use crate::budget::summary::category_total;
use crate::domain::{Category, Transaction};

#[derive(Debug, Clone, PartialEq)]
pub struct CategorySpending {
    pub category: Category,
    pub spent: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CashFlow {
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
    pub spending_by_category: Vec<CategorySpending>,
}

/// Income against expenses across every transaction, budgeted or not.
pub fn compute_cash_flow(transactions: &[Transaction]) -> CashFlow {
    let mut income = Decimal::ZERO;
    let mut expenses = Decimal::ZERO;
    for transaction in transactions {
        if transaction.is_income {
            income = income.saturating_add(transaction.amount);
        } else {
            expenses = expenses.saturating_add(transaction.amount);
        }
    }

    let spending_by_category = Category::ALL
        .into_iter()
        .map(|category| CategorySpending {
            category,
            spent: category_total(transactions, category),
        })
        .filter(|entry| entry.spent > Decimal::ZERO)
        .collect::<Vec<CategorySpending>>();

    CashFlow {
        income,
        expenses,
        net: income.saturating_sub(expenses),
        spending_by_category,
    }
}
