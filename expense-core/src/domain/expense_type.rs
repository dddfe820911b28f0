//! Expense type (spending category) domain model

use serde::{Deserialize, Serialize};

/// A user-defined spending category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExpenseType {
    pub id: i64,
    pub title: String,
}
