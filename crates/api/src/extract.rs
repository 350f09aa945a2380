//! Request body extractor that reports every input problem the same way.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;
use vx_core::error::CoreError;
use vx_core::validation::validate_input;

use crate::error::AppError;

/// A JSON body that deserialized and passed its `validator` rules.
///
/// Malformed JSON, missing or mistyped fields, and rule violations all
/// become a 400 `VALIDATION_ERROR`.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, AppError> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| CoreError::Validation(rejection.body_text()))?;
        validate_input(&value)?;
        Ok(ValidatedJson(value))
    }
}
