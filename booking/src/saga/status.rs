//! Classification of raw saga status strings.
//!
//! The backend vocabulary is open: new statuses appear without a contract
//! change. All classification goes through [`classify`] so an unrecognized
//! status lands in exactly one place, is logged once, and defaults to
//! "still processing" rather than silently becoming a success or failure.

/// Observable outcome of a saga status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SagaOutcome {
    /// The saga is still working; poll again
    Processing,
    /// The booking is confirmed and paid for (terminal)
    Success,
    /// The saga gave up on the booking (terminal)
    Failure,
}

impl SagaOutcome {
    /// Whether no further status change is expected.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Failure)
    }
}

/// Map a raw backend status string to its observable outcome.
///
/// Matching is exact, byte for byte: the vocabulary is what the backend
/// emits, and any deviation (different casing, surrounding whitespace, a
/// genuinely new status) classifies as [`SagaOutcome::Processing`]. Both
/// terminal outcomes are financially or UX sensitive, so a string outside
/// the table means "keep polling", bounded by the poll budget.
#[must_use]
pub fn classify(status: &str) -> SagaOutcome {
    match status {
        "CONFIRMED" | "PAID" => SagaOutcome::Success,
        "VALIDATION_PENDING" | "PENDING" | "PAYMENT_PENDING" => SagaOutcome::Processing,
        "PAYMENT_FAILED" | "VALIDATION_FAILED" | "FAILED" | "ERROR" | "REJECTED" => {
            SagaOutcome::Failure
        },
        other => {
            tracing::warn!(status = other, "Unrecognized saga status, still processing");
            SagaOutcome::Processing
        },
    }
}
