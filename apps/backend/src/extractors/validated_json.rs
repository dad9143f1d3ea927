use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::AppError;
use crate::errors::ErrorCode;

/// JSON body whose parse failures render as a 400 problem response with
/// `BAD_REQUEST` instead of actix's plain-text error.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let json = web::Json::<T>::from_request(req, payload);

        Box::pin(async move {
            match json.await {
                Ok(body) => Ok(ValidatedJson(body.into_inner())),
                Err(e) => {
                    debug!(error = %e, "Rejected request body");
                    Err(AppError::bad_request(
                        ErrorCode::BadRequest,
                        format!("Invalid request body: {e}"),
                    ))
                }
            }
        })
    }
}
