//! Completion-callback dispatch over the ExpenseApi port
//!
//! Screens issue a request and hand over a completion; they never block on
//! the network. Each request runs as a blocking task on a background tokio
//! runtime, and its completion is queued back to whichever thread owns the
//! [`CompletionQueue`] (the UI thread). Completions only run when that thread
//! drains the queue, so they never race with rendering.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::runtime::{Builder, Runtime};

use crate::domain::result::{Error, Result};
use crate::domain::{
    Account, AccountSummary, ExpenseType, NewAccount, NewExpense, Transaction, TransactionType,
    User,
};
use crate::ports::ExpenseApi;

type Completion = Box<dyn FnOnce() + Send + 'static>;

/// Issues API calls in the background and routes each result to exactly one
/// completion
pub struct ApiDispatcher {
    api: Arc<dyn ExpenseApi>,
    runtime: Runtime,
    sender: Sender<Completion>,
    in_flight: Arc<AtomicUsize>,
}

/// Receiving end of the completions, owned by the consumer thread
pub struct CompletionQueue {
    receiver: Receiver<Completion>,
    in_flight: Arc<AtomicUsize>,
}

impl ApiDispatcher {
    /// Create a dispatcher with its own I/O runtime
    pub fn new(api: Arc<dyn ExpenseApi>) -> Result<(Self, CompletionQueue)> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("expense-io")
            .enable_all()
            .build()
            .map_err(Error::Io)?;

        let (sender, receiver) = mpsc::channel();
        let in_flight = Arc::new(AtomicUsize::new(0));

        let dispatcher = Self {
            api,
            runtime,
            sender,
            in_flight: Arc::clone(&in_flight),
        };
        let queue = CompletionQueue {
            receiver,
            in_flight,
        };

        Ok((dispatcher, queue))
    }

    fn dispatch<T, F, C>(&self, call: F, completion: C)
    where
        T: Send + 'static,
        F: FnOnce(&dyn ExpenseApi) -> Result<T> + Send + 'static,
        C: FnOnce(Result<T>) + Send + 'static,
    {
        let api = Arc::clone(&self.api);
        let sender = self.sender.clone();
        self.in_flight.fetch_add(1, Ordering::SeqCst);

        self.runtime.spawn_blocking(move || {
            // A panicking adapter still owes its caller one completion
            let result = panic::catch_unwind(AssertUnwindSafe(|| call(api.as_ref())))
                .unwrap_or_else(|_| Err(Error::transport("request handler panicked")));
            // A dropped queue discards the completion; the request itself
            // has already run.
            let _ = sender.send(Box::new(move || completion(result)));
        });
    }

    pub fn fetch_accounts<C>(&self, user: &User, completion: C)
    where
        C: FnOnce(Result<Vec<Account>>) + Send + 'static,
    {
        let user = user.clone();
        self.dispatch(move |api| api.fetch_accounts(&user), completion);
    }

    pub fn fetch_account_summary<C>(&self, user: &User, account_id: i64, completion: C)
    where
        C: FnOnce(Result<AccountSummary>) + Send + 'static,
    {
        let user = user.clone();
        self.dispatch(
            move |api| api.fetch_account_summary(&user, account_id),
            completion,
        );
    }

    pub fn login<C>(&self, username: &str, password: &str, completion: C)
    where
        C: FnOnce(Result<User>) + Send + 'static,
    {
        let username = username.to_string();
        let password = password.to_string();
        self.dispatch(move |api| api.login(&username, &password), completion);
    }

    pub fn fetch_transactions<C>(
        &self,
        user: &User,
        account_id: i64,
        transaction_type: TransactionType,
        completion: C,
    ) where
        C: FnOnce(Result<Vec<Transaction>>) + Send + 'static,
    {
        let user = user.clone();
        self.dispatch(
            move |api| api.fetch_transactions(&user, account_id, transaction_type),
            completion,
        );
    }

    pub fn create_account<C>(&self, user: &User, account: NewAccount, completion: C)
    where
        C: FnOnce(Result<Account>) + Send + 'static,
    {
        let user = user.clone();
        self.dispatch(move |api| api.create_account(&user, &account), completion);
    }

    pub fn fetch_expense_types<C>(&self, user: &User, completion: C)
    where
        C: FnOnce(Result<Vec<ExpenseType>>) + Send + 'static,
    {
        let user = user.clone();
        self.dispatch(move |api| api.fetch_expense_types(&user), completion);
    }

    pub fn create_expense<C>(&self, user: &User, expense: NewExpense, completion: C)
    where
        C: FnOnce(Result<Transaction>) + Send + 'static,
    {
        let user = user.clone();
        self.dispatch(move |api| api.create_expense(&user, &expense), completion);
    }
}

impl CompletionQueue {
    /// Requests issued whose completion has not run yet
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    fn run(&self, completion: Completion) {
        completion();
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    /// Run every completion that is ready, without waiting
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        while let Ok(completion) = self.receiver.try_recv() {
            self.run(completion);
            ran += 1;
        }
        ran
    }

    /// Wait up to `timeout` for the next completion and run it
    ///
    /// Returns false if nothing arrived in time.
    pub fn wait_next(&self, timeout: Duration) -> bool {
        match self.receiver.recv_timeout(timeout) {
            Ok(completion) => {
                self.run(completion);
                true
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => false,
        }
    }

    /// Run completions until no request is in flight or `timeout` passes
    pub fn run_until_idle(&self, timeout: Duration) -> usize {
        let deadline = Instant::now() + timeout;
        let mut ran = self.run_pending();

        while self.in_flight() > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || !self.wait_next(remaining) {
                break;
            }
            ran += 1;
        }

        ran
    }
}
