//! Domain types for the booking flow.
//!
//! [`BookingFlowState`] is the single mutable record owned by the flow
//! reducer. Everything else here is data carried inside it: search criteria,
//! offers returned by the catalog services, and passenger records.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Steps of the reservation flow, in order.
///
/// `Error` sits outside the step order: it is absorbing, reached only when
/// the saga reports a terminal failure, and `NextStep`/`PrevStep` leave it
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStep {
    /// Searching the catalog for flights and/or hotels
    Search,
    /// Choosing among returned offers
    Select,
    /// Entering passenger / guest details
    Details,
    /// Payment step; submission happens here
    Payment,
    /// Terminal success display
    Confirmation,
    /// Terminal failure display
    Error,
}

impl BookingStep {
    /// The ordered steps navigable via `NextStep`/`PrevStep`.
    pub const ORDER: [Self; 5] = [
        Self::Search,
        Self::Select,
        Self::Details,
        Self::Payment,
        Self::Confirmation,
    ];

    /// Next step in order, saturating at `Confirmation`. `Error` is absorbing.
    #[must_use]
    pub fn next(self) -> Self {
        match Self::ORDER.iter().position(|step| *step == self) {
            Some(index) => Self::ORDER[(index + 1).min(Self::ORDER.len() - 1)],
            None => self,
        }
    }

    /// Previous step in order, saturating at `Search`. `Error` is absorbing.
    #[must_use]
    pub fn prev(self) -> Self {
        match Self::ORDER.iter().position(|step| *step == self) {
            Some(index) => Self::ORDER[index.saturating_sub(1)],
            None => self,
        }
    }
}

/// Product shape of the booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingType {
    /// Flight only
    Flight,
    /// Hotel only
    Hotel,
    /// Flight and hotel bundled into one transaction
    Combo,
}

/// Criteria of the most recent flight search, kept so later steps can show
/// and validate what was searched for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightSearchCriteria {
    /// Origin airport code
    pub origin: String,
    /// Destination airport code
    pub destination: String,
    /// Outbound date
    pub departure_date: NaiveDate,
    /// Inbound date for round trips
    pub return_date: Option<NaiveDate>,
    /// Number of travelling passengers
    pub passengers: u32,
}

/// Criteria of the most recent hotel search. The stay dates and room count
/// here feed the pricing rules when a room is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelSearchCriteria {
    /// Destination city
    pub city: String,
    /// Check-in date
    pub check_in_date: NaiveDate,
    /// Check-out date
    pub check_out_date: NaiveDate,
    /// Number of guests
    pub guests: u32,
    /// Number of rooms requested
    pub rooms: u32,
}

/// A flight offer returned by the catalog search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightOffer {
    /// Catalog identifier
    pub id: String,
    /// Marketing flight number
    pub flight_number: String,
    /// Operating airline name
    pub airline: String,
    /// Origin airport code
    pub origin: String,
    /// Destination airport code
    pub destination: String,
    /// Scheduled departure
    pub departure_time: DateTime<Utc>,
    /// Scheduled arrival
    pub arrival_time: DateTime<Utc>,
    /// Price per passenger
    pub price: Decimal,
    /// Currency of `price`
    pub currency: String,
    /// Booked cabin class, when the fare pins one
    pub seat_class: Option<String>,
    /// Backend schedule identifier, forwarded on submission
    pub schedule_id: Option<String>,
    /// Backend fare identifier, forwarded on submission
    pub fare_id: Option<String>,
}

/// A hotel property returned by the catalog search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelOffer {
    /// Catalog identifier
    pub id: String,
    /// Property name
    pub name: String,
    /// Street address
    pub address: String,
    /// City
    pub city: String,
    /// Country
    pub country: String,
    /// Star rating, when the property reports one
    pub star_rating: Option<u8>,
}

/// A bookable room within a selected hotel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomOffer {
    /// Catalog identifier of this specific room
    pub id: String,
    /// Backend room-type identifier, forwarded on submission
    pub room_type_id: String,
    /// Human-readable room type
    pub room_type: String,
    /// Nightly rate
    pub price_per_night: Decimal,
    /// Maximum occupancy
    pub capacity: u32,
    /// Bed configuration
    pub bed_type: Option<String>,
    /// Room amenities
    pub amenities: Vec<String>,
}

/// A passenger (flight) or guest (hotel) record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerInfo {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Date of birth
    pub date_of_birth: NaiveDate,
    /// Nationality
    pub nationality: String,
    /// Passport number, required for international flights
    pub passport_number: Option<String>,
}

/// The single source of truth for one reservation flow.
///
/// Exactly one writer exists (the reducer); everything else reads. The
/// `total_amount` field is derived from the selections via [`crate::pricing`]
/// and is only written by the selection actions and the explicit
/// `SetTotalAmount` override used for seeding in tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingFlowState {
    /// Current step of the flow
    pub step: BookingStep,
    /// Product shape being booked
    pub booking_type: BookingType,
    /// Criteria of the issued flight search, if any
    pub flight_search: Option<FlightSearchCriteria>,
    /// Criteria of the issued hotel search, if any
    pub hotel_search: Option<HotelSearchCriteria>,
    /// Chosen flight offer
    pub selected_flight: Option<FlightOffer>,
    /// Chosen hotel property
    pub selected_hotel: Option<HotelOffer>,
    /// Chosen room within the hotel
    pub selected_room: Option<RoomOffer>,
    /// Passenger / guest records, required before payment
    pub passengers: Vec<PassengerInfo>,
    /// Combined total, non-negative, derived from selections
    pub total_amount: Decimal,
    /// Currency code, fixed for the lifetime of the flow
    pub currency: String,
    /// Discount applied to combo bookings, zero otherwise
    pub combo_discount: Decimal,
}

impl BookingFlowState {
    /// A fresh flow at the search step with no selections.
    #[must_use]
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            step: BookingStep::Search,
            booking_type: BookingType::Flight,
            flight_search: None,
            hotel_search: None,
            selected_flight: None,
            selected_hotel: None,
            selected_room: None,
            passengers: Vec::new(),
            total_amount: Decimal::ZERO,
            currency: currency.into(),
            combo_discount: Decimal::ZERO,
        }
    }

    /// Seed the combo discount negotiated for this flow.
    #[must_use]
    pub const fn with_combo_discount(mut self, discount: Decimal) -> Self {
        self.combo_discount = discount;
        self
    }
}

impl Default for BookingFlowState {
    fn default() -> Self {
        Self::new("VND")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_saturates_at_confirmation() {
        assert_eq!(BookingStep::Search.next(), BookingStep::Select);
        assert_eq!(BookingStep::Payment.next(), BookingStep::Confirmation);
        assert_eq!(BookingStep::Confirmation.next(), BookingStep::Confirmation);
    }

    #[test]
    fn prev_saturates_at_search() {
        assert_eq!(BookingStep::Select.prev(), BookingStep::Search);
        assert_eq!(BookingStep::Search.prev(), BookingStep::Search);
    }

    #[test]
    fn error_step_is_absorbing() {
        assert_eq!(BookingStep::Error.next(), BookingStep::Error);
        assert_eq!(BookingStep::Error.prev(), BookingStep::Error);
    }

    #[test]
    #[allow(clippy::unwrap_used)] // Test code: serialization of plain enums
    fn steps_serialize_as_screaming_snake_case() {
        let json = serde_json::to_string(&BookingStep::Confirmation).unwrap();
        assert_eq!(json, "\"CONFIRMATION\"");

        let json = serde_json::to_string(&BookingType::Combo).unwrap();
        assert_eq!(json, "\"COMBO\"");
    }

    #[test]
    fn fresh_state_has_no_selections() {
        let state = BookingFlowState::default();
        assert_eq!(state.step, BookingStep::Search);
        assert_eq!(state.total_amount, Decimal::ZERO);
        assert_eq!(state.currency, "VND");
        assert!(state.passengers.is_empty());
        assert!(state.selected_flight.is_none());
    }
}
