#![allow(dead_code)]

// tests/common/mod.rs
use wordwolf::error::AppError;
use wordwolf::errors::ErrorCode;

// Logging is auto-installed for every test binary that declares `mod common;`
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Assert that `result` failed with `code`, showing the value otherwise.
#[track_caller]
pub fn assert_code<T: std::fmt::Debug>(result: Result<T, AppError>, code: ErrorCode) {
    match result {
        Ok(value) => panic!("expected {}, got Ok({value:?})", code.as_str()),
        Err(err) => assert_eq!(
            err.code(),
            code,
            "expected {}, got {} ({err})",
            code.as_str(),
            err.code().as_str()
        ),
    }
}
