//! Step-advance predicates over [`BookingFlowState`].
//!
//! These are advisory: the reducer does not hard-block `NextStep` internally.
//! The presentation layer checks the relevant gate before dispatching a step
//! change, which keeps UI policy out of the reducer.

use rust_decimal::Decimal;

use crate::types::{BookingFlowState, BookingType};

/// May the flow advance from `Search` to `Select`?
///
/// A search must have been issued for every product in the booking type.
#[must_use]
pub fn can_proceed_to_select(state: &BookingFlowState) -> bool {
    match state.booking_type {
        BookingType::Flight => state.flight_search.is_some(),
        BookingType::Hotel => state.hotel_search.is_some(),
        BookingType::Combo => state.flight_search.is_some() && state.hotel_search.is_some(),
    }
}

/// May the flow advance from `Select` to `Details`?
///
/// Every product in the booking type needs a concrete selection; hotels need
/// both the property and a room.
#[must_use]
pub fn can_proceed_to_details(state: &BookingFlowState) -> bool {
    let flight_chosen = state.selected_flight.is_some();
    let hotel_chosen = state.selected_hotel.is_some() && state.selected_room.is_some();

    match state.booking_type {
        BookingType::Flight => flight_chosen,
        BookingType::Hotel => hotel_chosen,
        BookingType::Combo => flight_chosen && hotel_chosen,
    }
}

/// May the flow advance from `Details` to `Payment`?
///
/// Requires at least one passenger record and a strictly positive total.
#[must_use]
pub fn can_proceed_to_payment(state: &BookingFlowState) -> bool {
    !state.passengers.is_empty() && state.total_amount > Decimal::ZERO
}
