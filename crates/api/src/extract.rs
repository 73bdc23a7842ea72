//! JSON body extraction with contract-conformant rejections.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// `axum::Json` with its rejection mapped into [`AppError`]: a non-JSON
/// content type is 415, an absent or syntactically invalid body is 400, and
/// valid JSON of the wrong shape is 422 — all in the shared error envelope
/// instead of the extractor's plain-text default.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(AppJson(value))
    }
}
