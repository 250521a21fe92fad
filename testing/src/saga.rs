//! Scripted saga transport for driving the booking flow in tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};

use wayfare_booking::saga::{
    SagaSubmissionError, SagaTransientError, SagaTransport, TransportFuture,
};
use wayfare_booking::wire::{
    BookingSagaRecord, StorefrontBookingRequest, StorefrontBookingResponse,
};

/// A saga record with the given status and test-fixture identifiers.
#[must_use]
pub fn record(status: &str) -> BookingSagaRecord {
    BookingSagaRecord {
        booking_id: "bk-1".to_string(),
        booking_reference: "WF-2026-0001".to_string(),
        status: status.to_string(),
        last_updated: Utc::now(),
        message: None,
        estimated_completion: None,
    }
}

/// Transport double that replays a scripted sequence of poll results.
///
/// Scripted entries are consumed in order; once the script runs out the
/// last successful record repeats, matching a backend that keeps reporting
/// its current status. Submission and cancellation calls are counted so
/// tests can assert the at-most-once property.
pub struct ScriptedSagaTransport {
    create_script: Mutex<VecDeque<Result<StorefrontBookingResponse, String>>>,
    poll_script: Mutex<VecDeque<Result<BookingSagaRecord, String>>>,
    last_record: Mutex<Option<BookingSagaRecord>>,
    create_calls: Arc<AtomicUsize>,
    poll_calls: Arc<AtomicUsize>,
    cancel_requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl Default for ScriptedSagaTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedSagaTransport {
    /// Transport with an empty script; submissions succeed with fixture ids.
    #[must_use]
    pub fn new() -> Self {
        Self {
            create_script: Mutex::new(VecDeque::new()),
            poll_script: Mutex::new(VecDeque::new()),
            last_record: Mutex::new(None),
            create_calls: Arc::new(AtomicUsize::new(0)),
            poll_calls: Arc::new(AtomicUsize::new(0)),
            cancel_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Append successful poll results with the given statuses, in order.
    #[must_use]
    pub fn with_statuses<I, S>(self, statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        {
            #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable
            let mut script = self.poll_script.lock().unwrap();
            let mut when = Utc::now();
            for status in statuses {
                let mut entry = record(status.as_ref());
                entry.last_updated = when;
                when += Duration::seconds(5);
                script.push_back(Ok(entry));
            }
        }
        self
    }

    /// Append one fully specified poll record.
    #[must_use]
    pub fn with_record(self, entry: BookingSagaRecord) -> Self {
        {
            #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable
            let mut script = self.poll_script.lock().unwrap();
            script.push_back(Ok(entry));
        }
        self
    }

    /// Append a failing poll at this position in the script.
    #[must_use]
    pub fn with_poll_failure(self, message: &str) -> Self {
        {
            #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable
            let mut script = self.poll_script.lock().unwrap();
            script.push_back(Err(message.to_string()));
        }
        self
    }

    /// Override the next submission response.
    #[must_use]
    pub fn with_create_response(self, response: StorefrontBookingResponse) -> Self {
        {
            #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable
            let mut script = self.create_script.lock().unwrap();
            script.push_back(Ok(response));
        }
        self
    }

    /// Make the next submission fail at the transport level.
    #[must_use]
    pub fn with_create_failure(self, message: &str) -> Self {
        {
            #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable
            let mut script = self.create_script.lock().unwrap();
            script.push_back(Err(message.to_string()));
        }
        self
    }

    /// Counter of submission calls that reached this transport.
    #[must_use]
    pub fn create_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.create_calls)
    }

    /// Counter of poll calls that reached this transport.
    #[must_use]
    pub fn poll_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.poll_calls)
    }

    /// Cancellation requests seen, as `(booking_id, reason)` pairs.
    #[must_use]
    pub fn cancel_requests(&self) -> Arc<Mutex<Vec<(String, String)>>> {
        Arc::clone(&self.cancel_requests)
    }

    fn default_create_response() -> StorefrontBookingResponse {
        StorefrontBookingResponse {
            booking_id: Some("bk-1".to_string()),
            booking_reference: Some("WF-2026-0001".to_string()),
            saga_id: Some("saga-1".to_string()),
            status: Some("PENDING".to_string()),
            ..StorefrontBookingResponse::default()
        }
    }
}

impl SagaTransport for ScriptedSagaTransport {
    fn create_booking<'a>(
        &'a self,
        _request: &StorefrontBookingRequest,
    ) -> TransportFuture<'a, StorefrontBookingResponse, SagaSubmissionError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);

        #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable
        let scripted = self.create_script.lock().unwrap().pop_front();
        let result = match scripted {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(SagaSubmissionError::Transport(message)),
            None => Ok(Self::default_create_response()),
        };

        Box::pin(async move { result })
    }

    fn poll_status<'a>(
        &'a self,
        _booking_id: &str,
    ) -> TransportFuture<'a, BookingSagaRecord, SagaTransientError> {
        self.poll_calls.fetch_add(1, Ordering::SeqCst);

        #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable
        let scripted = self.poll_script.lock().unwrap().pop_front();
        let result = match scripted {
            Some(Ok(entry)) => {
                #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable
                let mut last = self.last_record.lock().unwrap();
                *last = Some(entry.clone());
                Ok(entry)
            },
            Some(Err(message)) => Err(SagaTransientError::Transport(message)),
            None => {
                #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable
                let last = self.last_record.lock().unwrap().clone();
                last.ok_or_else(|| {
                    SagaTransientError::Transport("status script exhausted".to_string())
                })
            },
        };

        Box::pin(async move { result })
    }

    fn cancel_booking<'a>(
        &'a self,
        booking_id: &str,
        reason: &str,
    ) -> TransportFuture<'a, (), SagaTransientError> {
        #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable
        let mut requests = self.cancel_requests.lock().unwrap();
        requests.push((booking_id.to_string(), reason.to_string()));

        Box::pin(async move { Ok(()) })
    }
}
