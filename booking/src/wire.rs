//! Request and response types for the storefront booking API.
//!
//! Field names follow the backend's camelCase JSON contract. Optional fields
//! are skipped on serialization so the backend's validators see the same
//! shape a browser client would send.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{BookingType, PassengerInfo};

/// Body of `POST /bookings/storefront`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontBookingRequest {
    /// Product shape of the booking
    pub booking_type: BookingType,
    /// Combined total for the whole booking
    pub total_amount: Decimal,
    /// Currency of `total_amount`
    pub currency: String,
    /// Flight product details, present for FLIGHT and COMBO
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_selection: Option<FlightSelection>,
    /// Hotel product details, present for HOTEL and COMBO
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotel_selection: Option<HotelSelection>,
    /// Discount applied to combo bookings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combo_discount: Option<Decimal>,
    /// Free-form customer notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Flight portion of a booking request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSelection {
    /// Catalog flight identifier
    pub flight_id: String,
    /// Backend schedule identifier, when the offer carried one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_id: Option<String>,
    /// Backend fare identifier, when the offer carried one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fare_id: Option<String>,
    /// Booked cabin class
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seat_class: Option<String>,
    /// Scheduled departure
    pub departure_date_time: DateTime<Utc>,
    /// Scheduled arrival
    pub arrival_date_time: DateTime<Utc>,
    /// Number of travelling passengers
    pub passenger_count: u32,
    /// Passenger records
    pub passengers: Vec<PassengerInfo>,
    /// Fare per passenger
    pub price_per_passenger: Decimal,
    /// Total flight price
    pub total_flight_price: Decimal,
}

/// Hotel portion of a booking request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelSelection {
    /// Catalog hotel identifier
    pub hotel_id: String,
    /// Backend room-type identifier
    pub room_type_id: String,
    /// Check-in date
    pub check_in_date: NaiveDate,
    /// Check-out date
    pub check_out_date: NaiveDate,
    /// Billable nights
    pub number_of_nights: i64,
    /// Rooms booked
    pub number_of_rooms: u32,
    /// Guests staying
    pub number_of_guests: u32,
    /// Guest records
    pub guests: Vec<PassengerInfo>,
    /// Nightly rate
    pub price_per_night: Decimal,
    /// Total room price across nights and rooms
    pub total_room_price: Decimal,
}

/// Response of `POST /bookings/storefront`.
///
/// The backend reports failures both via non-2xx statuses and via an `error`
/// field on an otherwise well-formed body; callers must check both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontBookingResponse {
    /// Identifier of the created booking
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
    /// Human-facing booking reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_reference: Option<String>,
    /// Identifier of the saga driving this booking
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saga_id: Option<String>,
    /// Initial saga status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Echo of the submitted total
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Decimal>,
    /// Echo of the submitted currency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Creation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Error message when the submission was rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Machine-readable error code accompanying `error`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

/// Response of `GET /bookings/storefront/{bookingId}/status`.
///
/// Observed-only saga state; mutated by poll responses and never by the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSagaRecord {
    /// Identifier of the booking
    pub booking_id: String,
    /// Human-facing booking reference
    pub booking_reference: String,
    /// Raw backend status string; open vocabulary
    pub status: String,
    /// Timestamp of the most recent backend update
    pub last_updated: DateTime<Utc>,
    /// Optional human-readable progress hint, never used for control flow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Optional completion estimate, never used for control flow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_completion: Option<DateTime<Utc>>,
}
