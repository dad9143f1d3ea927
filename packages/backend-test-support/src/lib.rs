//! Helpers shared by the backend integration tests: logging bootstrap,
//! problem-details assertions and unique test data.
//!
//! Kept free of backend types so it builds independently of the app crate.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
