use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authorization header format must be 'Bearer <token>'")]
    InvalidAuthorization,
    #[error("required authorization token not found")]
    MissingToken,
    #[error("key supplier failed: {0}")]
    KeySupplier(String),
    #[error("failed to parse key material for {0}: {1}")]
    KeyParse(&'static str, String),
    #[error("token is not a valid encrypted message: {0}")]
    NotEncrypted(String),
    #[error("token could not be decrypted: {0}")]
    Decryption(String),
    #[error("token payload is not a valid signed message: {0}")]
    NotSigned(String),
    #[error("token signature verification failed: {0}")]
    Verification(String),
    #[error("failed to encode claim payload: {0}")]
    ClaimSerialization(String),
    #[error("failed to decode claim payload: {0}")]
    ClaimDecode(String),
    #[error("failed to sign claim payload: {0}")]
    Signing(String),
    #[error("failed to encrypt signed payload: {0}")]
    Encryption(String),
    #[error("no verified claim in request extensions")]
    MissingClaim,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AuthError::InvalidAuthorization | AuthError::MissingToken => {
                (StatusCode::UNAUTHORIZED, "AUTH_HEADER")
            }
            AuthError::NotEncrypted(_)
            | AuthError::Decryption(_)
            | AuthError::NotSigned(_)
            | AuthError::Verification(_) => (StatusCode::UNAUTHORIZED, "AUTH_TOKEN"),
            AuthError::KeySupplier(_) | AuthError::KeyParse(_, _) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "AUTH_KEYS")
            }
            AuthError::ClaimDecode(_) => (StatusCode::BAD_REQUEST, "AUTH_CLAIMS"),
            AuthError::ClaimSerialization(_)
            | AuthError::Signing(_)
            | AuthError::Encryption(_) => (StatusCode::INTERNAL_SERVER_ERROR, "AUTH_ISSUE"),
            AuthError::MissingClaim => (StatusCode::INTERNAL_SERVER_ERROR, "AUTH_CONTEXT"),
        };

        let body = ErrorBody {
            code,
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
