use jsonwebtoken::Algorithm;

/// JWT and password-hashing secrets
#[derive(Clone)]
pub struct SecurityConfig {
    /// JWT secret key for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    /// JWT algorithm to use (defaults to HS256)
    pub algorithm: Algorithm,
    /// Server-side pepper for join-password hashes
    pub password_salt: Vec<u8>,
}

impl SecurityConfig {
    /// Create a new SecurityConfig; the JWT secret doubles as password pepper.
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        let jwt_secret = jwt_secret.into();
        Self {
            password_salt: jwt_secret.clone(),
            jwt_secret,
            algorithm: Algorithm::HS256,
        }
    }

    pub fn with_password_salt(mut self, salt: impl Into<Vec<u8>>) -> Self {
        self.password_salt = salt.into();
        self
    }
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(b"default_secret_for_tests_only".to_vec())
    }
}
