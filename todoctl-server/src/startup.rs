//! Startup sequencing
//!
//! Runs once before the listener is bound:
//!
//! ```text
//! WaitingForStore --probe+schema ok--> SchemaReady --> Serving
//!        |  ^
//!        |  '-- failure, attempts left: sleep fixed delay
//!        '----- failure, budget spent --> StartupFailed
//! ```
//!
//! Sleeping goes through `tokio::time`, so a paused test clock makes the
//! whole sequence deterministic.

use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::config::RetryPolicy;
use crate::db::{StoreError, TodoStore};

/// Sequencer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupState {
    WaitingForStore,
    SchemaReady,
    Serving,
    StartupFailed,
}

/// Outcome of a successful startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupReport {
    /// Attempts made, including the successful one
    pub attempts: u32,
    /// Total time spent sleeping between attempts
    pub waited: Duration,
    /// Every state visited, in order
    pub transitions: Vec<StartupState>,
}

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("database not ready after {attempts} attempts: {last_error}")]
    Exhausted {
        attempts: u32,
        waited: Duration,
        last_error: StoreError,
        transitions: Vec<StartupState>,
    },
}

/// Drives a store from unknown to ready-to-serve.
pub struct StartupSequencer<'a> {
    store: &'a dyn TodoStore,
    policy: RetryPolicy,
    state: StartupState,
    transitions: Vec<StartupState>,
}

impl<'a> StartupSequencer<'a> {
    pub fn new(store: &'a dyn TodoStore, policy: RetryPolicy) -> Self {
        Self {
            store,
            policy,
            state: StartupState::WaitingForStore,
            transitions: vec![StartupState::WaitingForStore],
        }
    }

    pub fn state(&self) -> StartupState {
        self.state
    }

    fn enter(&mut self, next: StartupState) {
        debug!(from = ?self.state, to = ?next, "Startup transition");
        self.state = next;
        self.transitions.push(next);
    }

    /// One probe followed by schema creation. Either failing spends the attempt.
    async fn attempt(&self) -> Result<(), StoreError> {
        self.store.probe().await?;
        self.store.ensure_schema().await
    }

    /// Run to completion, consuming the sequencer.
    pub async fn run(mut self) -> Result<StartupReport, StartupError> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut waited = Duration::ZERO;
        let mut attempt = 0;

        loop {
            attempt += 1;
            info!(attempt, max_attempts, "Database initialization attempt");

            match self.attempt().await {
                Ok(()) => {
                    info!(attempt, "Database initialized successfully");
                    self.enter(StartupState::SchemaReady);
                    self.enter(StartupState::Serving);
                    return Ok(StartupReport {
                        attempts: attempt,
                        waited,
                        transitions: self.transitions,
                    });
                }
                Err(e) if attempt < max_attempts => {
                    warn!(
                        attempt,
                        max_attempts,
                        error = %e,
                        retry_in = ?self.policy.delay,
                        "Database initialization attempt failed"
                    );
                    tokio::time::sleep(self.policy.delay).await;
                    waited += self.policy.delay;
                }
                Err(e) => {
                    error!(attempts = attempt, error = %e, "Failed to initialize database after all attempts");
                    self.enter(StartupState::StartupFailed);
                    return Err(StartupError::Exhausted {
                        attempts: attempt,
                        waited,
                        last_error: e,
                        transitions: self.transitions,
                    });
                }
            }
        }
    }
}

/// Block until the store is reachable and the schema exists.
pub async fn wait_for_store(
    store: &dyn TodoStore,
    policy: RetryPolicy,
) -> Result<StartupReport, StartupError> {
    StartupSequencer::new(store, policy).run().await
}
