//! # Wayfare Booking
//!
//! Client-side booking orchestration for the storefront reservation flow.
//!
//! A user walks through a multi-step flow (search, select, details, payment,
//! confirmation) for three product shapes: flight-only, hotel-only, and a
//! flight+hotel combo. State lives in a single [`types::BookingFlowState`]
//! record owned by a deterministic reducer; the backend runs a distributed
//! transaction (the booking saga) which the client observes only through a
//! status-polling endpoint.
//!
//! ## Modules
//!
//! - [`types`] - Flow state, offers, search criteria, passengers
//! - [`pricing`] - Pure total computation (nights, room multipliers, combo discount)
//! - [`gates`] - Step-advance predicates checked by the caller before `NextStep`
//! - [`flow`] - The [`flow::BookingFlowReducer`] and its closed action vocabulary
//! - [`wire`] - REST request/response types for the storefront booking API
//! - [`saga`] - Submission client, status classification, and the polling loop
//! - [`presenter`] - Display-ready projection of the latest saga observation
//! - [`session`] - Glue binding the store, the saga client, and the poller
//!
//! ## Invariants
//!
//! - `total_amount` is always recomputed from current selections, never
//!   accumulated; computing it twice from the same state yields the same value.
//! - `create_booking` is issued at most once per flow (a booking is a financial
//!   side effect; duplicate submission is the failure mode to prevent).
//! - Poll responses are applied in issue order; one poll is in flight at a time.
//! - An unrecognized saga status is never treated as success or failure; it is
//!   logged and classified as still processing.

pub mod flow;
pub mod gates;
pub mod presenter;
pub mod pricing;
pub mod request;
pub mod saga;
pub mod session;
pub mod types;
pub mod wire;

pub use flow::{BookingFlowAction, BookingFlowReducer};
pub use saga::{BookingSagaClient, SagaOutcome, SagaPoller, SagaTransport, classify};
pub use session::BookingSession;
pub use types::{BookingFlowState, BookingStep, BookingType};
