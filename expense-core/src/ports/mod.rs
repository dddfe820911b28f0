//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. Services and the
//! CLI depend only on these traits, not on concrete implementations.

mod expense_api;

pub use expense_api::ExpenseApi;
