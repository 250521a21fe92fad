//! Display-ready projection of the latest saga observation.
//!
//! Purely a function of the observed record; holds no state and makes no
//! decisions. The payment-pending and validation-pending sub-states render
//! differently even though both classify as processing, so users see
//! "ready for payment" rather than a generic spinner.

use crate::saga::{SagaOutcome, classify};
use crate::wire::BookingSagaRecord;

/// Icon shown next to the status title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIcon {
    /// Terminal success
    CheckCircle,
    /// Terminal failure
    AlertCircle,
    /// Inventory locked, awaiting payment
    CreditCard,
    /// Backend validating availability
    Clock,
    /// Generic in-progress spinner
    Spinner,
}

/// Color tone of the status display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    /// Green, success
    Positive,
    /// Red, failure
    Negative,
    /// Amber, action required
    Attention,
    /// Blue, informational progress
    Informative,
    /// Muted, indeterminate progress
    Neutral,
}

/// What the confirmation panel shows for one observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPresentation {
    /// Classification of the observed status
    pub outcome: SagaOutcome,
    /// Short headline
    pub title: &'static str,
    /// Icon to render
    pub icon: StatusIcon,
    /// Color tone
    pub tone: StatusTone,
    /// Body text; backend message when present, otherwise a fallback
    pub message: String,
    /// Reference shown to the user on success
    pub booking_reference: Option<String>,
}

/// Project a saga record into its display form.
///
/// Nothing renders as confirmed unless [`classify`] says success; the
/// backend `message` only ever replaces body text, never the outcome.
#[must_use]
pub fn present(record: &BookingSagaRecord) -> StatusPresentation {
    let outcome = classify(&record.status);
    let message = record.message.clone();

    match outcome {
        SagaOutcome::Success => StatusPresentation {
            outcome,
            title: "Booking Confirmed",
            icon: StatusIcon::CheckCircle,
            tone: StatusTone::Positive,
            message: message.unwrap_or_else(|| "Booking confirmed successfully!".to_string()),
            booking_reference: Some(record.booking_reference.clone()),
        },
        SagaOutcome::Failure => StatusPresentation {
            outcome,
            title: "Booking Issue",
            icon: StatusIcon::AlertCircle,
            tone: StatusTone::Negative,
            message: message
                .unwrap_or_else(|| "There was a problem processing your booking.".to_string()),
            booking_reference: None,
        },
        SagaOutcome::Processing => match record.status.as_str() {
            "PENDING" | "PAYMENT_PENDING" => StatusPresentation {
                outcome,
                title: "Ready for Payment",
                icon: StatusIcon::CreditCard,
                tone: StatusTone::Attention,
                message: message
                    .unwrap_or_else(|| "Your booking is reserved, complete payment to confirm.".to_string()),
                booking_reference: None,
            },
            "VALIDATION_PENDING" => StatusPresentation {
                outcome,
                title: "Validating Booking",
                icon: StatusIcon::Clock,
                tone: StatusTone::Informative,
                message: message
                    .unwrap_or_else(|| "Checking availability with our partners...".to_string()),
                booking_reference: None,
            },
            _ => StatusPresentation {
                outcome,
                title: "Processing",
                icon: StatusIcon::Spinner,
                tone: StatusTone::Neutral,
                message: message.unwrap_or_else(|| "Processing your booking...".to_string()),
                booking_reference: None,
            },
        },
    }
}
