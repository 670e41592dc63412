//! Request body extractors.
//!
//! - [`AppJson`] -- `axum::Json` whose rejections become [`AppError`] JSON bodies.
//! - [`ValidatedJson`] -- [`AppJson`] followed by `validator` schema checks.

use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON body extractor that rejects with the API's error envelope instead
/// of axum's plain-text rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// JSON body that has passed its `#[validate(...)]` rules.
///
/// ```ignore
/// async fn create(ValidatedJson(input): ValidatedJson<CreateProject>) -> AppResult<...> {
///     // input is structurally valid here
/// }
/// ```
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let AppJson(value) = AppJson::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}
