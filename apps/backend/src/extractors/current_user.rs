use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};

use crate::auth::jwt::verify_access_token;
use crate::db::require_db;
use crate::error::AppError;
use crate::repos::users::User;
use crate::services::users::ensure_user;
use crate::state::app_state::AppState;

/// The authenticated user, resolved from `Authorization: Bearer <jwt>`.
///
/// The token subject is the user's public code; the row is created on the
/// first request that carries it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn id(&self) -> i64 {
        self.0.id
    }
}

fn bearer_token(req: &HttpRequest) -> Result<String, AppError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(AppError::unauthorized_missing_bearer)?
        .to_str()
        .map_err(|_| AppError::unauthorized_missing_bearer())?;

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("Bearer") => {
            Ok(token.to_string())
        }
        _ => Err(AppError::unauthorized_missing_bearer()),
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let token = bearer_token(&req)?;
            let state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not configured"))?;

            let claims = verify_access_token(&token, &state.security)?;
            let db = require_db(state)?;
            let user = ensure_user(db, &claims.sub, &claims.name).await?;
            Ok(CurrentUser(user))
        })
    }
}
