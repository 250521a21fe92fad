//! Submission client with an at-most-once guard.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::saga::error::{SagaSubmissionError, SagaTransientError};
use crate::saga::transport::SagaTransport;
use crate::wire::{BookingSagaRecord, StorefrontBookingRequest};

/// Identifiers returned by a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    /// Identifier of the created booking; key for status polls
    pub booking_id: String,
    /// Human-facing booking reference
    pub booking_reference: Option<String>,
    /// Identifier of the saga driving this booking
    pub saga_id: Option<String>,
    /// Initial status reported by the backend
    pub status: Option<String>,
}

/// Submits the booking and issues single-shot status polls.
///
/// A booking is a financial side effect, so `create_booking` goes out at
/// most once per flow. The guard flips before the request is issued and is
/// never cleared automatically: a transport failure leaves it set, because
/// the request may have reached the backend anyway. The user re-enables
/// submission via [`Self::acknowledge_not_created`] after confirming no
/// booking exists.
pub struct BookingSagaClient<T: SagaTransport> {
    transport: Arc<T>,
    submitted: AtomicBool,
}

impl<T: SagaTransport> BookingSagaClient<T> {
    /// Client over the given transport.
    pub fn new(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
            submitted: AtomicBool::new(false),
        }
    }

    /// Client sharing an already-wrapped transport.
    pub const fn from_arc(transport: Arc<T>) -> Self {
        Self {
            transport,
            submitted: AtomicBool::new(false),
        }
    }

    /// Whether a submission has been issued for this flow.
    pub fn has_submitted(&self) -> bool {
        self.submitted.load(Ordering::SeqCst)
    }

    /// Re-enable submission after the user confirmed no booking was created.
    pub fn acknowledge_not_created(&self) {
        self.submitted.store(false, Ordering::SeqCst);
    }

    /// Submit the booking. At most one call per flow reaches the network.
    ///
    /// # Errors
    ///
    /// - [`SagaSubmissionError::AlreadySubmitted`] when a submission was
    ///   already issued, including a double-click racing this call
    /// - [`SagaSubmissionError::Rejected`] when the backend refused the booking
    /// - [`SagaSubmissionError::MissingBookingId`] on a success response
    ///   without an identifier to poll
    /// - transport and HTTP errors from the wire
    pub async fn create_booking(
        &self,
        request: &StorefrontBookingRequest,
    ) -> Result<SubmissionReceipt, SagaSubmissionError> {
        if self
            .submitted
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SagaSubmissionError::AlreadySubmitted);
        }

        tracing::info!(
            booking_type = ?request.booking_type,
            total = %request.total_amount,
            currency = %request.currency,
            "Submitting booking"
        );

        let response = self.transport.create_booking(request).await?;

        if let Some(message) = response.error {
            return Err(SagaSubmissionError::Rejected {
                message,
                error_code: response.error_code,
            });
        }

        let booking_id = response
            .booking_id
            .ok_or(SagaSubmissionError::MissingBookingId)?;

        tracing::info!(
            booking_id = %booking_id,
            status = ?response.status,
            "Booking submitted"
        );

        Ok(SubmissionReceipt {
            booking_id,
            booking_reference: response.booking_reference,
            saga_id: response.saga_id,
            status: response.status,
        })
    }

    /// One status poll. Cadence and retries belong to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`SagaTransientError`] when the poll does not produce a record.
    pub async fn poll_status(
        &self,
        booking_id: &str,
    ) -> Result<BookingSagaRecord, SagaTransientError> {
        self.transport.poll_status(booking_id).await
    }

    /// Ask the backend to cancel the booking.
    ///
    /// The saga may or may not honor it; the effect shows up in later polls.
    ///
    /// # Errors
    ///
    /// Returns [`SagaTransientError`] when the request does not go through.
    pub async fn cancel_booking(
        &self,
        booking_id: &str,
        reason: &str,
    ) -> Result<(), SagaTransientError> {
        tracing::info!(booking_id = %booking_id, reason = %reason, "Requesting cancellation");
        self.transport.cancel_booking(booking_id, reason).await
    }
}

impl<T: SagaTransport + std::fmt::Debug> std::fmt::Debug for BookingSagaClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingSagaClient")
            .field("transport", &self.transport)
            .field("submitted", &self.has_submitted())
            .finish()
    }
}
