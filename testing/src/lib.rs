//! # Wayfare Testing
//!
//! Testing utilities and doubles for the Wayfare booking architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A scripted saga transport for driving the booking flow end to end
//! - Assertion helpers for reducers
//!
//! ## Example
//!
//! ```ignore
//! use wayfare_testing::saga::ScriptedSagaTransport;
//! use wayfare_booking::session::BookingSession;
//!
//! #[tokio::test]
//! async fn booking_confirms() {
//!     let transport = ScriptedSagaTransport::new()
//!         .with_statuses(["PENDING", "CONFIRMED"]);
//!     let session = BookingSession::new(transport, submittable_state());
//!     let (receipt, tracking) = session.submit_and_track().await.unwrap();
//!     tracking.await.unwrap().unwrap();
//! }
//! ```

use chrono::{DateTime, Utc};
use wayfare_core::environment::Clock;

pub mod reducer_test;
pub mod saga;

pub use mocks::{FixedClock, test_clock};
pub use reducer_test::ReducerTest;
pub use saga::ScriptedSagaTransport;

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use wayfare_testing::mocks::FixedClock;
    /// use wayfare_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2026-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}
