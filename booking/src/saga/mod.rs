//! Saga tracking: submission, status classification, and the polling loop.
//!
//! The backend runs a distributed transaction across inventory, payment, and
//! booking creation. The client never drives it; it submits once and then
//! observes reported status strings until a terminal outcome appears.
//!
//! - [`SagaTransport`] - the wire boundary (HTTP in production, scripted in tests)
//! - [`BookingSagaClient`] - at-most-once submission plus single-shot polls
//! - [`classify`] - the normative status-string classification
//! - [`SagaPoller`] - cancellable caller-driven polling loop

mod client;
mod error;
mod poller;
mod status;
mod transport;

pub use client::{BookingSagaClient, SubmissionReceipt};
pub use error::{SagaPollError, SagaSubmissionError, SagaTransientError};
pub use poller::{PollConfig, PollOutcome, SagaPoller};
pub use status::{SagaOutcome, classify};
pub use transport::{HttpSagaTransport, SagaTransport, TransportFuture};
