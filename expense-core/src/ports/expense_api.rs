//! Expense Tracker API port
//!
//! Defines the request/response contract with the remote Expense Tracker
//! service. The HTTP client implements it; the dispatcher and the CLI only
//! depend on this trait.

use crate::domain::result::Result;
use crate::domain::{
    Account, AccountSummary, ExpenseType, NewAccount, NewExpense, Transaction, TransactionType,
    User,
};

/// Remote Expense Tracker API
///
/// Every method issues exactly one request and returns either the decoded
/// record or an error (`Error::Transport` / `Error::Decode`). Nothing is
/// retried or cached.
pub trait ExpenseApi: Send + Sync {
    /// `GET accounts/`
    fn fetch_accounts(&self, user: &User) -> Result<Vec<Account>>;

    /// `GET accountSummary/{id}`
    fn fetch_account_summary(&self, user: &User, account_id: i64) -> Result<AccountSummary>;

    /// `POST login/` (unauthenticated)
    fn login(&self, username: &str, password: &str) -> Result<User>;

    /// `GET income/{id}` or `GET expense/{id}`
    fn fetch_transactions(
        &self,
        user: &User,
        account_id: i64,
        transaction_type: TransactionType,
    ) -> Result<Vec<Transaction>>;

    /// `POST accounts/`, owned by `user`
    fn create_account(&self, user: &User, account: &NewAccount) -> Result<Account>;

    /// `GET expenseTypes/`
    fn fetch_expense_types(&self, user: &User) -> Result<Vec<ExpenseType>>;

    /// `POST expense/`
    fn create_expense(&self, user: &User, expense: &NewExpense) -> Result<Transaction>;
}
