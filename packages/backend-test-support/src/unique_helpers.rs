//! Unique values for test isolation.

use ulid::Ulid;

/// `{prefix}-{ulid}`
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("user");
/// assert_ne!(a, unique_str("user"));
/// assert!(a.starts_with("user-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{prefix}-{}", Ulid::new())
}

/// Lower-case ULID, usable as a user code.
pub fn unique_code() -> String {
    Ulid::new().to_string().to_lowercase()
}
