//! Server configuration loaded from environment variables.

use std::env;

use crate::config::db::DbProfile;
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_profile: DbProfile,
    pub jwt_secret: String,
    /// Pepper mixed into join-password hashes.
    pub password_salt: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port_str = env::var("BACKEND_PORT").unwrap_or_else(|_| "3001".to_string());
        let port = port_str.parse::<u16>().map_err(|_| {
            AppError::config(format!(
                "BACKEND_PORT must be a valid port number, got '{port_str}'"
            ))
        })?;

        let jwt_secret = match env::var("BACKEND_JWT_SECRET") {
            Ok(secret) if secret.len() >= 32 => secret,
            Ok(_) => {
                return Err(AppError::config(
                    "BACKEND_JWT_SECRET is too short. It should be at least 32 characters.",
                ))
            }
            Err(_) => return Err(AppError::config("BACKEND_JWT_SECRET must be set.")),
        };

        let password_salt =
            env::var("WORDWOLF_PASSWORD_SALT").unwrap_or_else(|_| jwt_secret.clone());

        let db_profile = match env::var("WORDWOLF_SQLITE_FILE") {
            Ok(file) if !file.is_empty() => DbProfile::SqliteFile { file },
            _ => DbProfile::Prod,
        };

        Ok(Config {
            host,
            port,
            db_profile,
            jwt_secret,
            password_salt,
        })
    }
}
