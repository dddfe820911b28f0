//! Account domain models

use serde::{Deserialize, Serialize};

/// A named balance bucket owned by the user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub balance: i64,
}

/// Server-computed overview of a single account (`GET accountSummary/{id}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub id: i64,
    pub title: String,
    pub available_balance: i64,
    /// Spelled `dailyWithdrawlLimit` by the server; absent or null means no limit
    #[serde(rename = "dailyWithdrawlLimit", default)]
    pub daily_withdrawal_limit: Option<i64>,

    pub income_today: i64,
    pub income_this_month: i64,

    pub expenses_today: i64,
    pub expenses_this_month: i64,

    pub top_spending_categories: Vec<ExpenseByCategory>,
}

/// Aggregated spending for one category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseByCategory {
    pub category_title: String,
    pub expense: i64,
}

/// Input for `POST accounts/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    pub starting_balance: i64,
    pub daily_limit: Option<i64>,
}

impl NewAccount {
    pub fn new(name: impl Into<String>, starting_balance: i64) -> Self {
        Self {
            name: name.into(),
            starting_balance,
            daily_limit: None,
        }
    }

    pub fn with_daily_limit(mut self, limit: i64) -> Self {
        self.daily_limit = Some(limit);
        self
    }
}

/// Wire body for account creation
///
/// `daily_withdrawl_limit` is left out entirely when no limit is set.
#[derive(Debug, Serialize)]
pub(crate) struct CreateAccountBody<'a> {
    pub name: &'a str,
    pub balance: i64,
    pub owner: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_withdrawl_limit: Option<i64>,
}

impl<'a> CreateAccountBody<'a> {
    pub fn new(owner: i64, account: &'a NewAccount) -> Self {
        Self {
            name: &account.name,
            balance: account.starting_balance,
            owner,
            daily_withdrawl_limit: account.daily_limit,
        }
    }
}
