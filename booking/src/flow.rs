//! The booking flow reducer and its closed action vocabulary.
//!
//! The reducer is a total function: every `(state, action)` pair produces a
//! new state, no action can fail, and no action performs I/O. Network work
//! (submission, polling) lives in [`crate::session`] and feeds results back
//! as step changes.

use wayfare_core::effect::Effect;
use wayfare_core::reducer::Reducer;

use rust_decimal::Decimal;

use crate::pricing;
use crate::types::{
    BookingFlowState, BookingStep, BookingType, FlightOffer, FlightSearchCriteria, HotelOffer,
    HotelSearchCriteria, PassengerInfo, RoomOffer,
};

/// Everything that can happen to a [`BookingFlowState`].
///
/// `SetSelectedFlight` and `SetSelectedRoom` are the only actions that also
/// mutate `total_amount`; they recompute it from the full selection set so a
/// repeated selection never double-counts.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingFlowAction {
    /// Switch the product shape of the flow
    SetBookingType(BookingType),
    /// Jump to an explicit step (callers check the gates first)
    SetStep(BookingStep),
    /// Record the issued flight search
    SetFlightSearch(FlightSearchCriteria),
    /// Record the issued hotel search
    SetHotelSearch(HotelSearchCriteria),
    /// Choose or replace the flight offer, recomputing the total
    SetSelectedFlight(FlightOffer),
    /// Choose or replace the hotel property
    SetSelectedHotel(HotelOffer),
    /// Choose or replace the room, recomputing the total
    SetSelectedRoom(RoomOffer),
    /// Replace the passenger list
    SetPassengers(Vec<PassengerInfo>),
    /// Override the total directly; used only for seeding in tests
    SetTotalAmount(Decimal),
    /// Advance one step, saturating at `Confirmation`
    NextStep,
    /// Go back one step, saturating at `Search`
    PrevStep,
    /// Restore the construction-time initial state exactly
    ResetBooking,
}

/// Deterministic reducer owning the reservation flow.
///
/// Holds the initial state so `ResetBooking` can restore it exactly,
/// including a seeded combo discount.
#[derive(Debug, Clone)]
pub struct BookingFlowReducer {
    initial: BookingFlowState,
}

impl BookingFlowReducer {
    /// Reducer whose `ResetBooking` restores the given initial state.
    #[must_use]
    pub const fn new(initial: BookingFlowState) -> Self {
        Self { initial }
    }

    /// The state a fresh or reset flow starts from.
    #[must_use]
    pub const fn initial_state(&self) -> &BookingFlowState {
        &self.initial
    }
}

impl Default for BookingFlowReducer {
    fn default() -> Self {
        Self::new(BookingFlowState::default())
    }
}

impl Reducer for BookingFlowReducer {
    type State = BookingFlowState;
    type Action = BookingFlowAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut BookingFlowState,
        action: BookingFlowAction,
        _env: &(),
    ) -> Vec<Effect<BookingFlowAction>> {
        match action {
            BookingFlowAction::SetBookingType(booking_type) => {
                state.booking_type = booking_type;
            },
            BookingFlowAction::SetStep(step) => {
                state.step = step;
            },
            BookingFlowAction::SetFlightSearch(criteria) => {
                state.flight_search = Some(criteria);
            },
            BookingFlowAction::SetHotelSearch(criteria) => {
                state.hotel_search = Some(criteria);
            },
            BookingFlowAction::SetSelectedFlight(offer) => {
                state.selected_flight = Some(offer);
                state.total_amount = pricing::flow_total(state);
            },
            BookingFlowAction::SetSelectedHotel(offer) => {
                state.selected_hotel = Some(offer);
            },
            BookingFlowAction::SetSelectedRoom(room) => {
                state.selected_room = Some(room);
                state.total_amount = pricing::flow_total(state);
            },
            BookingFlowAction::SetPassengers(passengers) => {
                state.passengers = passengers;
            },
            BookingFlowAction::SetTotalAmount(amount) => {
                state.total_amount = amount;
            },
            BookingFlowAction::NextStep => {
                state.step = state.step.next();
            },
            BookingFlowAction::PrevStep => {
                state.step = state.step.prev();
            },
            BookingFlowAction::ResetBooking => {
                *state = self.initial.clone();
            },
        }

        vec![Effect::None]
    }
}
