//! Wire boundary for the storefront booking endpoints.
//!
//! The trait returns boxed futures so it stays dyn-compatible and mockable;
//! tests script it, production uses [`HttpSagaTransport`] over reqwest.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::saga::error::{SagaSubmissionError, SagaTransientError};
use crate::wire::{BookingSagaRecord, StorefrontBookingRequest, StorefrontBookingResponse};

/// Boxed future returned by transport methods.
pub type TransportFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Access to the storefront booking endpoints.
///
/// One method per endpoint, one network call per invocation. Loop cadence,
/// retries, and submission guards live in the callers, which keeps each
/// method cancellable and testable as a plain async function.
pub trait SagaTransport: Send + Sync {
    /// `POST /bookings/storefront` - submit the booking.
    fn create_booking<'a>(
        &'a self,
        request: &StorefrontBookingRequest,
    ) -> TransportFuture<'a, StorefrontBookingResponse, SagaSubmissionError>;

    /// `GET /bookings/storefront/{booking_id}/status` - one status poll.
    fn poll_status<'a>(
        &'a self,
        booking_id: &str,
    ) -> TransportFuture<'a, BookingSagaRecord, SagaTransientError>;

    /// `POST /bookings/commands/{booking_id}/cancel` - request cancellation.
    ///
    /// Fire-and-forget from the state machine's point of view; the saga
    /// reports the effect, if any, through subsequent status polls.
    fn cancel_booking<'a>(
        &'a self,
        booking_id: &str,
        reason: &str,
    ) -> TransportFuture<'a, (), SagaTransientError>;
}

/// Production transport over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSagaTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpSagaTransport {
    /// Transport against the given API base URL (no trailing slash).
    ///
    /// # Errors
    ///
    /// Returns the underlying builder error when the TLS backend cannot be
    /// initialized.
    pub fn new(base_url: impl Into<String>) -> Result<Self, SagaSubmissionError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|error| SagaSubmissionError::Transport(error.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Transport reusing an existing client (connection pooling).
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

impl SagaTransport for HttpSagaTransport {
    fn create_booking<'a>(
        &'a self,
        request: &StorefrontBookingRequest,
    ) -> TransportFuture<'a, StorefrontBookingResponse, SagaSubmissionError> {
        let url = format!("{}/bookings/storefront", self.base_url);
        let builder = self.http.post(url).json(request);

        Box::pin(async move {
            let response = builder
                .send()
                .await
                .map_err(|error| SagaSubmissionError::Transport(error.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.ok();

                // The backend reports refusals as JSON bodies on 4xx/5xx
                let parsed = body
                    .as_deref()
                    .and_then(|text| serde_json::from_str::<StorefrontBookingResponse>(text).ok());
                if let Some(parsed) = parsed {
                    if let Some(message) = parsed.error {
                        return Err(SagaSubmissionError::Rejected {
                            message,
                            error_code: parsed.error_code,
                        });
                    }
                }

                return Err(SagaSubmissionError::Http {
                    status: status.as_u16(),
                    body,
                });
            }

            response
                .json::<StorefrontBookingResponse>()
                .await
                .map_err(|error| SagaSubmissionError::Transport(error.to_string()))
        })
    }

    fn poll_status<'a>(
        &'a self,
        booking_id: &str,
    ) -> TransportFuture<'a, BookingSagaRecord, SagaTransientError> {
        let url = format!("{}/bookings/storefront/{booking_id}/status", self.base_url);
        let builder = self.http.get(url);

        Box::pin(async move {
            let response = builder
                .send()
                .await
                .map_err(|error| SagaTransientError::Transport(error.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(SagaTransientError::Http {
                    status: status.as_u16(),
                });
            }

            response
                .json::<BookingSagaRecord>()
                .await
                .map_err(|error| SagaTransientError::Transport(error.to_string()))
        })
    }

    fn cancel_booking<'a>(
        &'a self,
        booking_id: &str,
        reason: &str,
    ) -> TransportFuture<'a, (), SagaTransientError> {
        let url = format!("{}/bookings/commands/{booking_id}/cancel", self.base_url);
        let builder = self.http.post(url).query(&[("reason", reason)]);

        Box::pin(async move {
            let response = builder
                .send()
                .await
                .map_err(|error| SagaTransientError::Transport(error.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(SagaTransientError::Http {
                    status: status.as_u16(),
                });
            }

            Ok(())
        })
    }
}
