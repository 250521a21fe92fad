//! Pure pricing rules for the booking flow.
//!
//! Totals are always recomputed from the selections currently in state,
//! never accumulated onto a previous total. This makes every function here
//! idempotent: computing twice from the same state yields the same value.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::types::{BookingFlowState, BookingType, HotelSearchCriteria, RoomOffer};

/// Number of billable nights between check-in and check-out, minimum 1.
///
/// Same-day or inverted date pairs still bill a single night; the gate layer
/// is responsible for rejecting nonsense date ranges before they get here.
#[must_use]
pub fn nights(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days().max(1)
}

/// Hotel sub-total: nightly rate times nights times room count.
///
/// When no search criteria are stored the room is billed for one night and
/// one room, matching the absence of stay dates to multiply by.
#[must_use]
pub fn hotel_subtotal(room: &RoomOffer, search: Option<&HotelSearchCriteria>) -> Decimal {
    let (night_count, rooms) = match search {
        Some(criteria) => (
            nights(criteria.check_in_date, criteria.check_out_date),
            i64::from(criteria.rooms.max(1)),
        ),
        None => (1, 1),
    };
    room.price_per_night * Decimal::from(night_count) * Decimal::from(rooms)
}

/// Combined total for the current selections, per product shape.
///
/// - `FLIGHT`: the selected flight price, or zero before selection.
/// - `HOTEL`: the hotel sub-total, or zero before a room is chosen.
/// - `COMBO`: flight price plus hotel sub-total minus the combo discount,
///   clamped at zero so a generous discount never produces a negative total.
#[must_use]
pub fn flow_total(state: &BookingFlowState) -> Decimal {
    let flight_price = state
        .selected_flight
        .as_ref()
        .map_or(Decimal::ZERO, |flight| flight.price);

    let hotel_price = state
        .selected_room
        .as_ref()
        .map_or(Decimal::ZERO, |room| {
            hotel_subtotal(room, state.hotel_search.as_ref())
        });

    match state.booking_type {
        BookingType::Flight => flight_price,
        BookingType::Hotel => hotel_price,
        BookingType::Combo => (flight_price + hotel_price - state.combo_discount).max(Decimal::ZERO),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FlightOffer, HotelSearchCriteria};
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    fn flight(price: i64) -> FlightOffer {
        FlightOffer {
            id: "fl-1".to_string(),
            flight_number: "VN123".to_string(),
            airline: "Vietnam Airlines".to_string(),
            origin: "HAN".to_string(),
            destination: "SGN".to_string(),
            departure_time: Utc.with_ymd_and_hms(2026, 9, 1, 8, 0, 0).single().unwrap_or_default(),
            arrival_time: Utc.with_ymd_and_hms(2026, 9, 1, 10, 15, 0).single().unwrap_or_default(),
            price: Decimal::from(price),
            currency: "VND".to_string(),
            seat_class: None,
            schedule_id: None,
            fare_id: None,
        }
    }

    fn room(price_per_night: i64) -> RoomOffer {
        RoomOffer {
            id: "rm-1".to_string(),
            room_type_id: "rt-deluxe".to_string(),
            room_type: "Deluxe".to_string(),
            price_per_night: Decimal::from(price_per_night),
            capacity: 2,
            bed_type: Some("King".to_string()),
            amenities: vec![],
        }
    }

    #[allow(clippy::unwrap_used)] // Test code: literal dates are valid
    fn stay(check_in: (i32, u32, u32), check_out: (i32, u32, u32), rooms: u32) -> HotelSearchCriteria {
        HotelSearchCriteria {
            city: "Da Nang".to_string(),
            check_in_date: NaiveDate::from_ymd_opt(check_in.0, check_in.1, check_in.2).unwrap(),
            check_out_date: NaiveDate::from_ymd_opt(check_out.0, check_out.1, check_out.2).unwrap(),
            guests: 2,
            rooms,
        }
    }

    #[test]
    #[allow(clippy::unwrap_used)] // Test code: literal dates are valid
    fn nights_is_day_difference_with_floor_of_one() {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();

        assert_eq!(nights(date(2026, 9, 1), date(2026, 9, 3)), 2);
        assert_eq!(nights(date(2026, 9, 1), date(2026, 9, 2)), 1);
        assert_eq!(nights(date(2026, 9, 1), date(2026, 9, 1)), 1);
        assert_eq!(nights(date(2026, 9, 3), date(2026, 9, 1)), 1);
    }

    #[test]
    fn flight_total_is_selected_flight_price() {
        let mut state = BookingFlowState::default();
        state.booking_type = BookingType::Flight;
        state.selected_flight = Some(flight(1_500_000));

        assert_eq!(flow_total(&state), Decimal::from(1_500_000));
    }

    #[test]
    fn hotel_total_multiplies_nights_and_rooms() {
        let mut state = BookingFlowState::default();
        state.booking_type = BookingType::Hotel;
        state.hotel_search = Some(stay((2026, 9, 1), (2026, 9, 3), 1));
        state.selected_room = Some(room(2_000_000));

        assert_eq!(flow_total(&state), Decimal::from(4_000_000));
    }

    #[test]
    fn hotel_total_without_search_bills_one_night_one_room() {
        let mut state = BookingFlowState::default();
        state.booking_type = BookingType::Hotel;
        state.selected_room = Some(room(2_000_000));

        assert_eq!(flow_total(&state), Decimal::from(2_000_000));
    }

    #[test]
    fn combo_total_subtracts_discount() {
        let mut state = BookingFlowState::default().with_combo_discount(Decimal::from(300_000));
        state.booking_type = BookingType::Combo;
        state.selected_flight = Some(flight(1_500_000));
        state.hotel_search = Some(stay((2026, 9, 1), (2026, 9, 3), 1));
        state.selected_room = Some(room(2_000_000));

        assert_eq!(flow_total(&state), Decimal::from(5_200_000));
    }

    #[test]
    fn combo_total_clamps_at_zero() {
        let mut state = BookingFlowState::default().with_combo_discount(Decimal::from(10_000_000));
        state.booking_type = BookingType::Combo;
        state.selected_flight = Some(flight(1_000_000));
        state.hotel_search = Some(stay((2026, 9, 1), (2026, 9, 3), 1));
        state.selected_room = Some(room(1_000_000));

        assert_eq!(flow_total(&state), Decimal::ZERO);
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut state = BookingFlowState::default().with_combo_discount(Decimal::from(300_000));
        state.booking_type = BookingType::Combo;
        state.selected_flight = Some(flight(1_500_000));
        state.hotel_search = Some(stay((2026, 9, 1), (2026, 9, 3), 2));
        state.selected_room = Some(room(2_000_000));

        let first = flow_total(&state);
        state.total_amount = first;
        let second = flow_total(&state);

        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn total_is_never_negative(
            flight_price in 0i64..100_000_000,
            nightly in 0i64..50_000_000,
            discount in 0i64..200_000_000,
            night_span in 0i64..30,
            rooms in 1u32..5,
        ) {
            let mut state = BookingFlowState::default()
                .with_combo_discount(Decimal::from(discount));
            state.booking_type = BookingType::Combo;
            state.selected_flight = Some(flight(flight_price));
            let check_in = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap_or_default();
            state.hotel_search = Some(HotelSearchCriteria {
                city: "Hue".to_string(),
                check_in_date: check_in,
                check_out_date: check_in + chrono::Duration::days(night_span),
                guests: 2,
                rooms,
            });
            state.selected_room = Some(room(nightly));

            prop_assert!(flow_total(&state) >= Decimal::ZERO);
        }

        #[test]
        fn recompute_twice_matches(
            flight_price in 0i64..100_000_000,
            nightly in 0i64..50_000_000,
        ) {
            let mut state = BookingFlowState::default();
            state.booking_type = BookingType::Combo;
            state.selected_flight = Some(flight(flight_price));
            state.selected_room = Some(room(nightly));

            let first = flow_total(&state);
            state.total_amount = first;
            prop_assert_eq!(flow_total(&state), first);
        }
    }
}
