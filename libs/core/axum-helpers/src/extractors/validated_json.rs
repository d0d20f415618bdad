//! JSON extractor that runs `validator` rules before the handler.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Deserializes the body as JSON, then validates it.
///
/// Malformed bodies are rejected with [`AppError::JsonExtractorRejection`];
/// rule violations with [`AppError::ValidationError`], rendered as a list of
/// `{field, message}` details.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct NewProduct {
///     #[validate(length(min = 1, max = 100))]
///     title: String,
/// }
///
/// async fn create(ValidatedJson(body): ValidatedJson<NewProduct>) -> String {
///     body.title
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}
