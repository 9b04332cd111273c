use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::error::{AuthError, AuthResult};

/// Pulls a raw token string out of the request head.
///
/// `Ok(None)` means the request simply carries no token, which is not an
/// error. `Err` is reserved for a token-bearing field that exists but is
/// malformed.
pub trait TokenExtractor: Send + Sync {
    fn extract(&self, parts: &Parts) -> AuthResult<Option<String>>;
}

/// Extracts a bearer token from the `Authorization` header.
#[derive(Debug, Clone, Copy, Default)]
pub struct FromAuthHeader;

impl TokenExtractor for FromAuthHeader {
    fn extract(&self, parts: &Parts) -> AuthResult<Option<String>> {
        let Some(value) = parts.headers.get(AUTHORIZATION) else {
            return Ok(None);
        };
        let raw = value
            .to_str()
            .map_err(|_| AuthError::InvalidAuthorization)?;
        if raw.is_empty() {
            return Ok(None);
        }

        let mut segments = raw.split(' ');
        match (segments.next(), segments.next(), segments.next()) {
            // An empty token segment counts as absence, so composed
            // extractors fall through and optional credentials continue.
            (Some(scheme), Some(""), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(None),
            (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => {
                Ok(Some(token.to_owned()))
            }
            _ => Err(AuthError::InvalidAuthorization),
        }
    }
}

/// Extracts the token from a named query string parameter.
#[derive(Debug, Clone)]
pub struct FromParameter {
    name: String,
}

impl FromParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl TokenExtractor for FromParameter {
    fn extract(&self, parts: &Parts) -> AuthResult<Option<String>> {
        let query = parts.uri.query().unwrap_or("");
        for pair in query.split('&') {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            if name == self.name && !value.is_empty() {
                return Ok(Some(value.to_owned()));
            }
        }
        Ok(None)
    }
}

/// Runs extractors in order and takes the first token found.
///
/// The first extractor error encountered is propagated immediately; if every
/// source yields nothing the result is `Ok(None)`.
#[derive(Default)]
pub struct FromFirst {
    sources: Vec<Box<dyn TokenExtractor>>,
}

impl FromFirst {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn or(mut self, source: impl TokenExtractor + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }
}

impl TokenExtractor for FromFirst {
    fn extract(&self, parts: &Parts) -> AuthResult<Option<String>> {
        for source in &self.sources {
            if let Some(token) = source.extract(parts)? {
                return Ok(Some(token));
            }
        }
        Ok(None)
    }
}
