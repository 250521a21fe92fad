//! Projection of a [`BookingFlowState`] into a storefront booking request.
//!
//! Submission happens once the flow reaches the payment step, so every
//! selection the booking type needs must be present by then. Missing pieces
//! are reported as [`RequestError`] instead of submitting a partial booking.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::pricing;
use crate::types::{BookingFlowState, BookingType};
use crate::wire::{FlightSelection, HotelSelection, StorefrontBookingRequest};

/// A flow state that cannot be submitted yet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The booking type needs a flight but none is selected
    #[error("no flight selected")]
    MissingFlightSelection,

    /// The booking type needs a hotel room but hotel or room is missing
    #[error("no hotel room selected")]
    MissingHotelSelection,

    /// No passenger records have been entered
    #[error("no passengers entered")]
    MissingPassengers,

    /// The computed total is zero or negative
    #[error("total amount must be positive")]
    NonPositiveTotal,
}

/// Build the submission body from the current flow state.
///
/// The total is recomputed here rather than trusted from `total_amount`, so
/// a stale or seeded value can never be submitted.
///
/// # Errors
///
/// Returns [`RequestError`] when a selection required by the booking type is
/// absent, when no passengers are entered, or when the total is not positive.
pub fn build_booking_request(
    state: &BookingFlowState,
) -> Result<StorefrontBookingRequest, RequestError> {
    if state.passengers.is_empty() {
        return Err(RequestError::MissingPassengers);
    }

    let needs_flight = matches!(state.booking_type, BookingType::Flight | BookingType::Combo);
    let needs_hotel = matches!(state.booking_type, BookingType::Hotel | BookingType::Combo);

    let flight_selection = if needs_flight {
        Some(flight_selection(state)?)
    } else {
        None
    };

    let hotel_selection = if needs_hotel {
        Some(hotel_selection(state)?)
    } else {
        None
    };

    let total_amount = pricing::flow_total(state);
    if total_amount <= Decimal::ZERO {
        return Err(RequestError::NonPositiveTotal);
    }

    let combo_discount = match state.booking_type {
        BookingType::Combo => Some(state.combo_discount),
        BookingType::Flight | BookingType::Hotel => None,
    };

    Ok(StorefrontBookingRequest {
        booking_type: state.booking_type,
        total_amount,
        currency: state.currency.clone(),
        flight_selection,
        hotel_selection,
        combo_discount,
        notes: None,
    })
}

fn flight_selection(state: &BookingFlowState) -> Result<FlightSelection, RequestError> {
    let flight = state
        .selected_flight
        .as_ref()
        .ok_or(RequestError::MissingFlightSelection)?;

    let passenger_count = u32::try_from(state.passengers.len()).unwrap_or(u32::MAX);

    Ok(FlightSelection {
        flight_id: flight.id.clone(),
        schedule_id: flight.schedule_id.clone(),
        fare_id: flight.fare_id.clone(),
        seat_class: flight.seat_class.clone(),
        departure_date_time: flight.departure_time,
        arrival_date_time: flight.arrival_time,
        passenger_count,
        passengers: state.passengers.clone(),
        price_per_passenger: flight.price,
        total_flight_price: flight.price,
    })
}

fn hotel_selection(state: &BookingFlowState) -> Result<HotelSelection, RequestError> {
    let hotel = state
        .selected_hotel
        .as_ref()
        .ok_or(RequestError::MissingHotelSelection)?;
    let room = state
        .selected_room
        .as_ref()
        .ok_or(RequestError::MissingHotelSelection)?;
    let search = state
        .hotel_search
        .as_ref()
        .ok_or(RequestError::MissingHotelSelection)?;

    let number_of_nights = pricing::nights(search.check_in_date, search.check_out_date);

    Ok(HotelSelection {
        hotel_id: hotel.id.clone(),
        room_type_id: room.room_type_id.clone(),
        check_in_date: search.check_in_date,
        check_out_date: search.check_out_date,
        number_of_nights,
        number_of_rooms: search.rooms,
        number_of_guests: search.guests,
        guests: state.passengers.clone(),
        price_per_night: room.price_per_night,
        total_room_price: pricing::hotel_subtotal(room, Some(search)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        FlightOffer, HotelOffer, HotelSearchCriteria, PassengerInfo, RoomOffer,
    };
    use chrono::{NaiveDate, Utc};

    fn passenger() -> PassengerInfo {
        PassengerInfo {
            first_name: "Linh".to_string(),
            last_name: "Nguyen".to_string(),
            date_of_birth: NaiveDate::default(),
            nationality: "VN".to_string(),
            passport_number: None,
        }
    }

    #[allow(clippy::unwrap_used)] // Test code: literal dates are valid
    fn submittable_combo_state() -> BookingFlowState {
        let mut state =
            BookingFlowState::default().with_combo_discount(Decimal::from(300_000));
        state.booking_type = BookingType::Combo;
        state.passengers = vec![passenger()];
        state.hotel_search = Some(HotelSearchCriteria {
            city: "Da Nang".to_string(),
            check_in_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            check_out_date: NaiveDate::from_ymd_opt(2026, 9, 3).unwrap(),
            guests: 2,
            rooms: 1,
        });
        state.selected_flight = Some(FlightOffer {
            id: "fl-1".to_string(),
            flight_number: "VN123".to_string(),
            airline: "Vietnam Airlines".to_string(),
            origin: "HAN".to_string(),
            destination: "SGN".to_string(),
            departure_time: Utc::now(),
            arrival_time: Utc::now(),
            price: Decimal::from(1_500_000),
            currency: "VND".to_string(),
            seat_class: Some("ECONOMY".to_string()),
            schedule_id: Some("sch-1".to_string()),
            fare_id: None,
        });
        state.selected_hotel = Some(HotelOffer {
            id: "ht-1".to_string(),
            name: "Riverside".to_string(),
            address: "1 Bach Dang".to_string(),
            city: "Da Nang".to_string(),
            country: "VN".to_string(),
            star_rating: Some(4),
        });
        state.selected_room = Some(RoomOffer {
            id: "rm-1".to_string(),
            room_type_id: "rt-1".to_string(),
            room_type: "Deluxe".to_string(),
            price_per_night: Decimal::from(2_000_000),
            capacity: 2,
            bed_type: None,
            amenities: vec![],
        });
        state
    }

    #[test]
    #[allow(clippy::unwrap_used)] // Test code: state is fully populated
    fn combo_request_carries_both_products_and_recomputed_total() {
        let state = submittable_combo_state();
        let request = build_booking_request(&state).unwrap();

        assert_eq!(request.booking_type, BookingType::Combo);
        assert_eq!(request.total_amount, Decimal::from(5_200_000));
        assert_eq!(request.combo_discount, Some(Decimal::from(300_000)));

        let flight = request.flight_selection.unwrap();
        assert_eq!(flight.flight_id, "fl-1");
        assert_eq!(flight.passenger_count, 1);

        let hotel = request.hotel_selection.unwrap();
        assert_eq!(hotel.number_of_nights, 2);
        assert_eq!(hotel.total_room_price, Decimal::from(4_000_000));
    }

    #[test]
    fn stale_total_amount_is_ignored() {
        let mut state = submittable_combo_state();
        state.total_amount = Decimal::from(1);

        #[allow(clippy::unwrap_used)] // Test code: state is fully populated
        let request = build_booking_request(&state).unwrap();
        assert_eq!(request.total_amount, Decimal::from(5_200_000));
    }

    #[test]
    fn missing_selection_is_rejected() {
        let mut state = submittable_combo_state();
        state.selected_room = None;
        assert_eq!(
            build_booking_request(&state),
            Err(RequestError::MissingHotelSelection)
        );

        let mut state = submittable_combo_state();
        state.selected_flight = None;
        assert_eq!(
            build_booking_request(&state),
            Err(RequestError::MissingFlightSelection)
        );
    }

    #[test]
    fn missing_passengers_are_rejected() {
        let mut state = submittable_combo_state();
        state.passengers.clear();
        assert_eq!(
            build_booking_request(&state),
            Err(RequestError::MissingPassengers)
        );
    }
}
