//! Error taxonomy for saga submission and polling.

use thiserror::Error;

use crate::wire::BookingSagaRecord;

/// `create_booking` failed or was refused.
///
/// Never retried automatically: a booking is a financial side effect, and
/// the request may have reached the backend even when the response did not
/// come back. Retrying is a user decision after confirming no booking exists.
#[derive(Debug, Error)]
pub enum SagaSubmissionError {
    /// A submission was already issued for this flow
    #[error("a booking was already submitted for this flow")]
    AlreadySubmitted,

    /// The backend refused the booking
    #[error("booking rejected: {message}")]
    Rejected {
        /// Backend-provided error message
        message: String,
        /// Machine-readable error code, when present
        error_code: Option<String>,
    },

    /// The backend answered with a non-success HTTP status
    #[error("booking endpoint returned HTTP {status}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body, when one could be read
        body: Option<String>,
    },

    /// The request never produced a response
    #[error("booking submission transport failure: {0}")]
    Transport(String),

    /// A 2xx response without a booking identifier
    #[error("booking response carried no bookingId")]
    MissingBookingId,
}

/// A single status poll failed.
///
/// Retried silently by the polling loop within its budget; never changes
/// the flow step.
#[derive(Debug, Clone, Error)]
pub enum SagaTransientError {
    /// The status endpoint answered with a non-success HTTP status
    #[error("status endpoint returned HTTP {status}")]
    Http {
        /// HTTP status code
        status: u16,
    },

    /// The request never produced a usable response
    #[error("status poll transport failure: {0}")]
    Transport(String),
}

/// The polling loop ended without a terminal classification.
#[derive(Debug, Error)]
pub enum SagaPollError {
    /// Polling was cancelled by the hosting flow
    #[error("polling cancelled")]
    Cancelled,

    /// The attempt or wall-clock budget ran out while still processing
    #[error("no terminal status after {attempts} polls")]
    BudgetExhausted {
        /// Polls issued before giving up
        attempts: u32,
        /// Last record observed, when at least one poll succeeded
        last: Option<BookingSagaRecord>,
    },

    /// A poll kept failing past the per-poll retry budget
    #[error(transparent)]
    Transient(#[from] SagaTransientError),
}
