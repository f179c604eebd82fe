//! One user's finances, loaded from the ledger and kept consistent in memory.
//!
//! A session is owned by its caller and passed explicitly. Every mutation goes
//! to the ledger first, including the refreshed spent cache, and only then
//! replaces the snapshot. A failed write leaves the snapshot untouched.

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::budget::{
    BudgetSummary, CashFlow, category_total, compute_cash_flow, recompute_spent, summarize_budgets,
};
use crate::domain::{
    AiTip, Budget, Category, NewBudget, NewSavingsGoal, NewTransaction, SavingsGoal, Transaction,
};
use crate::goals::GoalUpdate;
use crate::setup::ensure_initialized_with_home_override;
use crate::state::resolve_user_id;
use crate::store;
use crate::{ClientError, ClientResult};

#[derive(Debug)]
pub struct FinanceSession {
    connection: Connection,
    db_path: PathBuf,
    user_id: String,
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    goals: Vec<SavingsGoal>,
    tips: Vec<AiTip>,
    summary: BudgetSummary,
}

impl FinanceSession {
    /// Opens (creating if needed) the ledger and loads the resolved user.
    pub fn open(home_override: Option<&Path>, user_override: Option<&str>) -> ClientResult<Self> {
        let user_id = resolve_user_id(user_override)?;
        let setup = ensure_initialized_with_home_override(home_override)?;
        Self::load(setup.connection, setup.db_path, &user_id)
    }

    pub fn load(connection: Connection, db_path: PathBuf, user_id: &str) -> ClientResult<Self> {
        let transactions = store::transactions::list_transactions(&connection, &db_path, user_id)?;
        let budgets = store::budgets::list_budgets(&connection, &db_path, user_id)?;
        let goals = store::goals::list_goals(&connection, &db_path, user_id)?;
        let tips = store::tips::list_tips(&connection, &db_path, user_id, false, None)?;

        let mut session = Self {
            connection,
            db_path,
            user_id: user_id.to_string(),
            transactions: Vec::new(),
            budgets: Vec::new(),
            goals,
            tips,
            summary: summarize_budgets(&[]),
        };
        session.refresh(transactions, budgets)?;
        Ok(session)
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Newest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn goals(&self) -> &[SavingsGoal] {
        &self.goals
    }

    pub fn tips(&self) -> &[AiTip] {
        &self.tips
    }

    pub fn summary(&self) -> &BudgetSummary {
        &self.summary
    }

    pub fn cash_flow(&self) -> CashFlow {
        compute_cash_flow(&self.transactions)
    }

    pub fn category_total(&self, category: Category) -> Decimal {
        category_total(&self.transactions, category)
    }

    pub fn recent_transactions(&self, count: usize) -> &[Transaction] {
        let end = count.min(self.transactions.len());
        &self.transactions[..end]
    }

    pub fn unread_tips(&self, count: usize) -> Vec<&AiTip> {
        self.tips
            .iter()
            .filter(|tip| !tip.is_read)
            .take(count)
            .collect()
    }

    pub fn add_transaction(&mut self, new: &NewTransaction) -> ClientResult<Transaction> {
        let transaction = store::transactions::insert_transaction(
            &self.connection,
            &self.db_path,
            &self.user_id,
            new,
        )?;
        let mut transactions = self.transactions.clone();
        insert_newest_first(&mut transactions, transaction.clone());
        self.refresh(transactions, self.budgets.clone())?;
        Ok(transaction)
    }

    /// All-or-nothing batch insert, tagged with `import_id`.
    pub fn import_transactions(
        &mut self,
        rows: &[NewTransaction],
        import_id: &str,
    ) -> ClientResult<Vec<Transaction>> {
        let inserted = store::transactions::insert_batch(
            &mut self.connection,
            &self.db_path,
            &self.user_id,
            rows,
            import_id,
        )?;
        let mut transactions = self.transactions.clone();
        for transaction in &inserted {
            insert_newest_first(&mut transactions, transaction.clone());
        }
        self.refresh(transactions, self.budgets.clone())?;
        Ok(inserted)
    }

    pub fn create_budget(&mut self, new: &NewBudget) -> ClientResult<Budget> {
        let budget =
            store::budgets::insert_budget(&self.connection, &self.db_path, &self.user_id, new)?;
        let mut budgets = self.budgets.clone();
        budgets.push(budget);
        self.refresh(self.transactions.clone(), budgets)?;
        self.budgets
            .last()
            .cloned()
            .ok_or_else(|| ClientError::ledger_corrupt(&self.db_path))
    }

    pub fn create_goal(&mut self, new: &NewSavingsGoal) -> ClientResult<SavingsGoal> {
        let goal = store::goals::insert_goal(&self.connection, &self.db_path, &self.user_id, new)?;
        self.goals.push(goal.clone());
        Ok(goal)
    }

    pub fn contribute(&mut self, goal_id: &str, amount: Decimal) -> ClientResult<GoalUpdate> {
        let update = store::goals::contribute_to_goal(
            &mut self.connection,
            &self.db_path,
            &self.user_id,
            goal_id,
            amount,
        )?;
        self.replace_goal(&update.goal);
        Ok(update)
    }

    pub fn set_goal_amount(&mut self, goal_id: &str, amount: Decimal) -> ClientResult<GoalUpdate> {
        let update = store::goals::set_goal_amount(
            &mut self.connection,
            &self.db_path,
            &self.user_id,
            goal_id,
            amount,
        )?;
        self.replace_goal(&update.goal);
        Ok(update)
    }

    pub fn mark_tip_read(&mut self, tip_id: &str) -> ClientResult<AiTip> {
        let tip = store::tips::mark_tip_read(&self.connection, &self.db_path, &self.user_id, tip_id)?;
        if let Some(slot) = self.tips.iter_mut().find(|existing| existing.id == tip.id) {
            *slot = tip.clone();
        }
        Ok(tip)
    }

    pub(crate) fn connection_mut(&mut self) -> &mut Connection {
        &mut self.connection
    }

    /// Reloads every collection after writes made outside the session methods.
    pub(crate) fn reload(self) -> ClientResult<Self> {
        let Self {
            connection,
            db_path,
            user_id,
            ..
        } = self;
        Self::load(connection, db_path, &user_id)
    }

    /// Recomputes spent values from `transactions`, persists the ones whose
    /// cached value changed, then swaps the snapshot in.
    fn refresh(&mut self, transactions: Vec<Transaction>, budgets: Vec<Budget>) -> ClientResult<()> {
        let refreshed = recompute_spent(&transactions, &budgets);
        let changed = refreshed
            .iter()
            .zip(&budgets)
            .filter(|(fresh, cached)| fresh.current_spent != cached.current_spent)
            .map(|(fresh, _)| fresh.clone())
            .collect::<Vec<Budget>>();
        if !changed.is_empty() {
            store::budgets::write_spent_cache(
                &mut self.connection,
                &self.db_path,
                &self.user_id,
                &changed,
            )?;
        }

        self.summary = summarize_budgets(&refreshed);
        self.transactions = transactions;
        self.budgets = refreshed;
        Ok(())
    }

    fn replace_goal(&mut self, goal: &SavingsGoal) {
        match self.goals.iter_mut().find(|existing| existing.id == goal.id) {
            Some(slot) => *slot = goal.clone(),
            None => self.goals.push(goal.clone()),
        }
    }
}

fn insert_newest_first(transactions: &mut Vec<Transaction>, transaction: Transaction) {
    let position = transactions.partition_point(|existing| existing.date > transaction.date);
    transactions.insert(position, transaction);
}
