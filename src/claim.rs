use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::error::{AuthError, AuthResult};

/// Verified claim payload stored in request extensions by the middleware.
///
/// The payload is opaque bytes (conventionally JSON); interpretation is left
/// to the application. Cloning is cheap, the bytes are shared.
#[derive(Debug, Clone)]
pub struct VerifiedClaim {
    payload: Arc<[u8]>,
}

impl VerifiedClaim {
    pub fn new(payload: Vec<u8>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Decode the payload as JSON into an application claim type.
    pub fn json<T: DeserializeOwned>(&self) -> AuthResult<T> {
        serde_json::from_slice(&self.payload).map_err(|err| AuthError::ClaimDecode(err.to_string()))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for VerifiedClaim
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<VerifiedClaim>()
            .cloned()
            .ok_or(AuthError::MissingClaim)
    }
}
