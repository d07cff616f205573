use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::{HeaderValue, header::CONTENT_TYPE},
};
use serde::de::DeserializeOwned;

use crate::api::error::ApiError;

/// Request body that may arrive as JSON or as a URL-encoded form.
///
/// Form bodies are picked by their content type, everything else goes through
/// the JSON extractor.
#[derive(Debug)]
pub struct Payload<T>(pub T);

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Media types are case-insensitive, parameters such as `charset` are ignored.
fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(FORM_URLENCODED))
}

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(mut req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            // `Form` only accepts the lowercase spelling.
            req.headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static(FORM_URLENCODED));
            let Form(value) = Form::<T>::from_request(req, state).await?;
            Ok(Payload(value))
        } else {
            let Json(value) = Json::<T>::from_request(req, state).await?;
            Ok(Payload(value))
        }
    }
}
