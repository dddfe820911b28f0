//! Service layer
//!
//! Services sit between the front end and the ExpenseApi port: holding the
//! session, dispatching requests in the background, and recording events.

pub mod dispatch;
pub mod logging;
mod session;

pub use dispatch::{ApiDispatcher, CompletionQueue};
pub use logging::{EntryPoint, LogEntry, LogEvent, LoggingService};
pub use session::SessionService;
