//! Transaction domain models

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Wire format for transaction dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A dated monetary movement against an account
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    /// The server names this field `transcation_date`
    #[serde(rename = "transcation_date", with = "date_format")]
    pub date: NaiveDate,
    pub amount: i64,
}

/// Which side of the ledger to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

impl TransactionType {
    /// Endpoint prefix, e.g. `income/` for `GET income/{accountID}`
    pub fn endpoint(&self) -> &'static str {
        match self {
            TransactionType::Income => "income/",
            TransactionType::Expense => "expense/",
        }
    }

    /// Plural heading for list screens
    pub fn title(&self) -> &'static str {
        match self {
            TransactionType::Income => "Incomes",
            TransactionType::Expense => "Expenses",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Income => write!(f, "income"),
            TransactionType::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "incomes" => Ok(TransactionType::Income),
            "expense" | "expenses" => Ok(TransactionType::Expense),
            other => Err(format!("unknown transaction type '{}'", other)),
        }
    }
}

/// Input for `POST expense/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub account_id: i64,
    pub amount: i64,
    pub expense_type_id: i64,
}

/// Wire body for expense creation
#[derive(Debug, Serialize)]
pub(crate) struct CreateExpenseBody {
    pub amount: i64,
    pub account: i64,
    pub expense_type: i64,
}

impl From<&NewExpense> for CreateExpenseBody {
    fn from(expense: &NewExpense) -> Self {
        Self {
            amount: expense.amount,
            account: expense.account_id,
            expense_type: expense.expense_type_id,
        }
    }
}

/// `yyyy-MM-dd` dates
mod date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::DATE_FORMAT;

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;
        let s = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&s, DATE_FORMAT)
            .map_err(|e| D::Error::custom(format!("invalid date '{}': {}", s, e)))
    }
}
