//! DTOs for users_sea adapter.

/// Identity asserted by a verified access token.
#[derive(Debug, Clone)]
pub struct UserUpsert {
    pub code: String,
    pub name: String,
}

impl UserUpsert {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}
