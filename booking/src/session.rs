//! Glue binding the flow store, the saga client, and the poller.
//!
//! A [`BookingSession`] owns one reservation flow end to end: UI dispatches
//! actions into the store, `submit_and_track` issues the single submission
//! and spawns the polling task, and each poll observation is published to
//! subscribers in issue order. Terminal classifications come back into the
//! flow as step changes; nothing else mutates the state.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use wayfare_runtime::{EffectHandle, Store, StoreError};

use crate::flow::{BookingFlowAction, BookingFlowReducer};
use crate::request::{RequestError, build_booking_request};
use crate::saga::{
    BookingSagaClient, PollConfig, PollOutcome, SagaOutcome, SagaPollError, SagaPoller,
    SagaSubmissionError, SagaTransientError, SagaTransport, SubmissionReceipt,
};
use crate::types::{BookingFlowState, BookingStep};
use crate::wire::BookingSagaRecord;

/// Store specialization for the booking flow.
pub type FlowStore = Store<BookingFlowState, BookingFlowAction, (), BookingFlowReducer>;

/// One successful poll, as delivered to observers.
#[derive(Debug, Clone)]
pub struct SagaObservation {
    /// The polled record
    pub record: BookingSagaRecord,
    /// Its classification
    pub outcome: SagaOutcome,
}

/// The session could not submit or drive the flow.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The flow state is not submittable yet
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Submission failed or was refused
    #[error(transparent)]
    Submission(#[from] SagaSubmissionError),

    /// The store rejected the dispatch
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Cancellation could not be requested
    #[error(transparent)]
    Cancel(#[from] SagaTransientError),

    /// No booking has been submitted yet
    #[error("no booking submitted for this session")]
    NotSubmitted,
}

/// Owns one reservation flow: state, submission, and saga tracking.
pub struct BookingSession<T: SagaTransport + 'static> {
    store: FlowStore,
    client: Arc<BookingSagaClient<T>>,
    poll_config: PollConfig,
    observations: watch::Sender<Option<SagaObservation>>,
    poll_cancel: Mutex<Option<watch::Sender<bool>>>,
    active_booking: Mutex<Option<String>>,
}

impl<T: SagaTransport + 'static> BookingSession<T> {
    /// Session over the given transport, starting from `initial` state.
    #[must_use]
    pub fn new(transport: T, initial: BookingFlowState) -> Self {
        Self::with_poll_config(transport, initial, PollConfig::default())
    }

    /// Session with a custom polling cadence (tests use a fast one).
    #[must_use]
    pub fn with_poll_config(
        transport: T,
        initial: BookingFlowState,
        poll_config: PollConfig,
    ) -> Self {
        let reducer = BookingFlowReducer::new(initial.clone());
        let (observations, _) = watch::channel(None);

        Self {
            store: Store::new(initial, reducer, ()),
            client: Arc::new(BookingSagaClient::new(transport)),
            poll_config,
            observations,
            poll_cancel: Mutex::new(None),
            active_booking: Mutex::new(None),
        }
    }

    /// Dispatch a flow action.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store is shutting down.
    pub async fn dispatch(&self, action: BookingFlowAction) -> Result<EffectHandle, StoreError> {
        self.store.send(action).await
    }

    /// Read the current flow state via a closure.
    pub async fn state<F, U>(&self, f: F) -> U
    where
        F: FnOnce(&BookingFlowState) -> U,
    {
        self.store.state(f).await
    }

    /// Subscribe to poll observations, latest value semantics.
    #[must_use]
    pub fn observations(&self) -> watch::Receiver<Option<SagaObservation>> {
        self.observations.subscribe()
    }

    /// The saga client, for submission-state queries.
    #[must_use]
    pub const fn client(&self) -> &Arc<BookingSagaClient<T>> {
        &self.client
    }

    /// Submit the booking and spawn the tracking task.
    ///
    /// At most one submission reaches the network per session. The spawned
    /// task polls until a terminal classification and then moves the flow
    /// to `Confirmation` or `Error`; cancellation via [`Self::abort`] stops
    /// it without a step change.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when the state is not submittable, the
    /// submission was already issued, or the backend refused it.
    pub async fn submit_and_track(
        &self,
    ) -> Result<(SubmissionReceipt, JoinHandle<Result<PollOutcome, SagaPollError>>), SessionError>
    {
        let request = self.state(build_booking_request).await?;
        let receipt = self.client.create_booking(&request).await?;

        self.set_active_booking(receipt.booking_id.clone());
        let handle = self.spawn_tracking(receipt.booking_id.clone());

        Ok((receipt, handle))
    }

    /// Ask the backend to cancel the submitted booking.
    ///
    /// The polling task keeps running: the saga reports the cancellation,
    /// if honored, through its status, which then moves the flow step. A
    /// submitted booking is never silently abandoned.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotSubmitted`] before submission, or the
    /// transport error when the request does not go through.
    pub async fn cancel_booking(&self, reason: &str) -> Result<(), SessionError> {
        let booking_id = self
            .active_booking_id()
            .ok_or(SessionError::NotSubmitted)?;

        self.client.cancel_booking(&booking_id, reason).await?;
        Ok(())
    }

    /// Stop the tracking task without touching the flow state.
    ///
    /// For UI teardown. No observation is delivered after this returns.
    pub fn abort(&self) {
        #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable
        let cancel = self.poll_cancel.lock().unwrap().take();
        if let Some(cancel) = cancel {
            let _ = cancel.send(true);
        }
    }

    /// Gracefully shut down the underlying store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] when effects are still
    /// pending at the deadline.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        self.abort();
        self.store.shutdown(timeout).await
    }

    fn set_active_booking(&self, booking_id: String) {
        #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable
        let mut active = self.active_booking.lock().unwrap();
        *active = Some(booking_id);
    }

    fn active_booking_id(&self) -> Option<String> {
        #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable
        self.active_booking.lock().unwrap().clone()
    }

    fn spawn_tracking(
        &self,
        booking_id: String,
    ) -> JoinHandle<Result<PollOutcome, SagaPollError>> {
        let (cancel_tx, cancel_rx) = watch::channel(false);
        {
            #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable
            let mut slot = self.poll_cancel.lock().unwrap();
            // A fresh tracking task supersedes any previous one
            if let Some(previous) = slot.replace(cancel_tx) {
                let _ = previous.send(true);
            }
        }

        let poller = SagaPoller::new(Arc::clone(&self.client), self.poll_config.clone());
        let store = self.store.clone();
        let observations = self.observations.clone();

        tokio::spawn(async move {
            let result = poller
                .poll_until_terminal(&booking_id, cancel_rx, |record, outcome| {
                    let _ = observations.send(Some(SagaObservation {
                        record: record.clone(),
                        outcome,
                    }));
                })
                .await;

            let step = match &result {
                Ok(outcome) if outcome.outcome == SagaOutcome::Success => {
                    Some(BookingStep::Confirmation)
                },
                Ok(_) => Some(BookingStep::Error),
                Err(SagaPollError::Cancelled) => None,
                Err(error) => {
                    tracing::warn!(booking_id = %booking_id, %error, "Saga tracking gave up");
                    Some(BookingStep::Error)
                },
            };

            if let Some(step) = step {
                if let Err(error) = store.send(BookingFlowAction::SetStep(step)).await {
                    tracing::error!(%error, "Failed to apply terminal step");
                }
            }

            result
        })
    }
}
