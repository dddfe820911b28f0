//! Core domain entities
//!
//! Immutable records exchanged with the Expense Tracker API. These are pure
//! data structures - no I/O or external dependencies.

mod account;
mod expense_type;
mod transaction;
mod user;
pub mod result;

pub use account::{Account, AccountSummary, ExpenseByCategory, NewAccount};
pub use expense_type::ExpenseType;
pub use transaction::{NewExpense, Transaction, TransactionType, DATE_FORMAT};
pub use user::{User, UserCredentials};

pub(crate) use account::CreateAccountBody;
pub(crate) use transaction::CreateExpenseBody;
