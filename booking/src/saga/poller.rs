//! Cancellable polling loop over the status endpoint.
//!
//! Exactly one poll is in flight at a time, so observations arrive in issue
//! order and a slow response can never overwrite a later one. The loop stops
//! on the first terminal classification, on cancellation, or when either the
//! attempt count or the wall-clock budget runs out.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{Instant, sleep_until};

use wayfare_runtime::retry::{RetryPolicy, retry_with_backoff};

use crate::saga::client::BookingSagaClient;
use crate::saga::error::SagaPollError;
use crate::saga::status::{SagaOutcome, classify};
use crate::saga::transport::SagaTransport;
use crate::wire::BookingSagaRecord;

/// Cadence and budget of the polling loop.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Fixed wait between polls
    pub interval: Duration,
    /// Maximum number of polls before giving up
    pub max_attempts: u32,
    /// Wall-clock budget for the whole loop
    pub max_elapsed: Duration,
    /// Retry policy for a single failing poll
    pub retry: RetryPolicy,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: 60,
            max_elapsed: Duration::from_secs(600),
            retry: RetryPolicy::builder()
                .max_retries(2)
                .initial_delay(Duration::from_millis(500))
                .max_delay(Duration::from_secs(5))
                .build(),
        }
    }
}

/// Final observation of a completed polling loop.
#[derive(Debug, Clone)]
pub struct PollOutcome {
    /// The record that carried the terminal status
    pub record: BookingSagaRecord,
    /// Its classification; always terminal
    pub outcome: SagaOutcome,
    /// Polls issued, including the terminal one
    pub attempts: u32,
}

/// Drives [`BookingSagaClient::poll_status`] until a terminal outcome.
pub struct SagaPoller<T: SagaTransport> {
    client: Arc<BookingSagaClient<T>>,
    config: PollConfig,
}

impl<T: SagaTransport> SagaPoller<T> {
    /// Poller over a shared client with the given cadence.
    pub const fn new(client: Arc<BookingSagaClient<T>>, config: PollConfig) -> Self {
        Self { client, config }
    }

    /// Poll until a terminal classification, cancellation, or budget end.
    ///
    /// `observe` runs once per successful poll, in issue order, before the
    /// loop decides whether to continue. Flipping `cancel` to `true` stops
    /// the loop at the next suspension point; no observation is delivered
    /// after cancellation.
    ///
    /// # Errors
    ///
    /// - [`SagaPollError::Cancelled`] when the cancel signal fired
    /// - [`SagaPollError::BudgetExhausted`] when the saga was still
    ///   processing at the end of the budget
    /// - [`SagaPollError::Transient`] when a single poll kept failing past
    ///   its retry budget
    #[tracing::instrument(skip(self, cancel, observe), name = "saga_poll_loop")]
    pub async fn poll_until_terminal<F>(
        &self,
        booking_id: &str,
        mut cancel: watch::Receiver<bool>,
        mut observe: F,
    ) -> Result<PollOutcome, SagaPollError>
    where
        F: FnMut(&BookingSagaRecord, SagaOutcome) + Send,
    {
        let deadline = Instant::now() + self.config.max_elapsed;
        let mut attempts: u32 = 0;
        let mut last_record: Option<BookingSagaRecord> = None;

        loop {
            if *cancel.borrow() {
                return Err(SagaPollError::Cancelled);
            }

            attempts += 1;
            let record = tokio::select! {
                biased;
                _ = cancel.wait_for(|cancelled| *cancelled) => {
                    return Err(SagaPollError::Cancelled);
                },
                result = retry_with_backoff(self.config.retry.clone(), || {
                    self.client.poll_status(booking_id)
                }) => result?,
            };

            let outcome = classify(&record.status);
            tracing::debug!(
                booking_id = %booking_id,
                status = %record.status,
                ?outcome,
                attempts,
                "Saga status observed"
            );

            observe(&record, outcome);

            if outcome.is_terminal() {
                return Ok(PollOutcome {
                    record,
                    outcome,
                    attempts,
                });
            }
            last_record = Some(record);

            let next_poll = Instant::now() + self.config.interval;
            if attempts >= self.config.max_attempts || next_poll >= deadline {
                tracing::warn!(
                    booking_id = %booking_id,
                    attempts,
                    "Poll budget exhausted while saga still processing"
                );
                return Err(SagaPollError::BudgetExhausted {
                    attempts,
                    last: last_record,
                });
            }

            tokio::select! {
                biased;
                _ = cancel.wait_for(|cancelled| *cancelled) => {
                    return Err(SagaPollError::Cancelled);
                },
                () = sleep_until(next_poll) => {},
            }
        }
    }
}
