//! Test-only bootstrap for unit tests.

pub mod logging;
