//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - Blocking reqwest HTTP client for the ExpenseApi port
//! - Mock API server for tests

pub mod http;

#[cfg(test)]
pub mod mock_server;
