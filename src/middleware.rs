use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::Method;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde::Serialize;
use tracing::{debug, warn};

use crate::claim::VerifiedClaim;
use crate::config::JoseConfig;
use crate::error::{AuthError, AuthResult};
use crate::extract::{FromAuthHeader, TokenExtractor};
use crate::issuer::TokenIssuer;
use crate::keys::KeySupplier;
use crate::verifier::TokenVerifier;

/// Produces the client-visible response for a rejected request.
pub trait ErrorHandler: Send + Sync {
    fn handle(&self, error: AuthError) -> Response;
}

impl<F> ErrorHandler for F
where
    F: Fn(AuthError) -> Response + Send + Sync,
{
    fn handle(&self, error: AuthError) -> Response {
        self(error)
    }
}

/// Default handler: the error's own response (401/500 + JSON body).
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultErrorHandler;

impl ErrorHandler for DefaultErrorHandler {
    fn handle(&self, error: AuthError) -> Response {
        error.into_response()
    }
}

/// Authentication middleware: extractor → verifier → claim in extensions.
///
/// Holds no mutable state; wrap it in an [`Arc`] and share it across
/// requests. Also exposes the request-independent [`issue`](Self::issue)
/// operation for minting tokens.
pub struct JoseAuth {
    config: JoseConfig,
    verifier: TokenVerifier,
    issuer: TokenIssuer,
    extractor: Box<dyn TokenExtractor>,
    error_handler: Box<dyn ErrorHandler>,
}

impl JoseAuth {
    /// Middleware with the default bearer-header extractor and error handler.
    pub fn new(config: JoseConfig, keys: impl KeySupplier + 'static) -> Self {
        Self::builder(config, keys).build()
    }

    pub fn builder(config: JoseConfig, keys: impl KeySupplier + 'static) -> JoseAuthBuilder {
        JoseAuthBuilder::new(config, Arc::new(keys))
    }

    pub fn config(&self) -> &JoseConfig {
        &self.config
    }

    /// Decrypt and verify a raw token, returning the claim payload bytes.
    pub fn verify(&self, token: &str) -> AuthResult<Vec<u8>> {
        self.verifier.verify(token)
    }

    /// Sign and encrypt a claim into a serialized token.
    pub fn issue<T: Serialize>(&self, claim: &T) -> AuthResult<String> {
        self.issuer.issue(claim)
    }

    /// Run the per-request pipeline, invoking `next` only for authenticated
    /// (or exempt) requests.
    pub async fn check(&self, request: Request, next: Next) -> Response {
        if request.method() == Method::OPTIONS && !self.config.auth_on_options {
            return next.run(request).await;
        }

        let (mut parts, body) = request.into_parts();

        let token = match self.extractor.extract(&parts) {
            Ok(token) => token,
            Err(err) => {
                warn!(error = %err, "token extraction failed");
                return self.error_handler.handle(err);
            }
        };

        let Some(token) = token else {
            if self.config.credentials_optional {
                debug!("no credentials found, continuing without a claim");
                return next.run(Request::from_parts(parts, body)).await;
            }
            warn!("required authorization token not found");
            return self.error_handler.handle(AuthError::MissingToken);
        };

        match self.verifier.verify(&token) {
            Ok(payload) => {
                parts.extensions.insert(VerifiedClaim::new(payload));
                next.run(Request::from_parts(parts, body)).await
            }
            Err(err) => {
                warn!(error = %err, "token verification failed");
                self.error_handler.handle(err)
            }
        }
    }
}

/// Attach the middleware to a router.
pub fn apply<S>(router: Router<S>, auth: Arc<JoseAuth>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(auth, authenticate))
}

async fn authenticate(
    State(auth): State<Arc<JoseAuth>>,
    request: Request,
    next: Next,
) -> Response {
    auth.check(request, next).await
}

pub struct JoseAuthBuilder {
    config: JoseConfig,
    keys: Arc<dyn KeySupplier>,
    extractor: Box<dyn TokenExtractor>,
    error_handler: Box<dyn ErrorHandler>,
}

impl JoseAuthBuilder {
    fn new(config: JoseConfig, keys: Arc<dyn KeySupplier>) -> Self {
        Self {
            config,
            keys,
            extractor: Box::new(FromAuthHeader),
            error_handler: Box::new(DefaultErrorHandler),
        }
    }

    pub fn with_extractor(mut self, extractor: impl TokenExtractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    pub fn with_error_handler(mut self, handler: impl ErrorHandler + 'static) -> Self {
        self.error_handler = Box::new(handler);
        self
    }

    pub fn build(self) -> JoseAuth {
        let verifier = TokenVerifier::new(self.config.clone(), Arc::clone(&self.keys));
        let issuer = TokenIssuer::new(self.config.clone(), self.keys);
        JoseAuth {
            config: self.config,
            verifier,
            issuer,
            extractor: self.extractor,
            error_handler: self.error_handler,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{FromFirst, FromParameter};
    use crate::keys::StaticKeys;
    use crate::test_support::generate_pair;
    use axum::body::Body;
    use axum::http::header::AUTHORIZATION;
    use axum::http::{Request as HttpRequest, StatusCode};
    use axum::routing::get;
    use http_body_util::BodyExt;
    use serde::{Deserialize, Serialize};
    use tower::ServiceExt;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Identity {
        name: String,
    }

    async fn show_claim(claim: VerifiedClaim) -> String {
        String::from_utf8(claim.payload().to_vec()).expect("utf-8 claim")
    }

    async fn show_optional_claim(claim: Option<VerifiedClaim>) -> String {
        match claim {
            Some(claim) => String::from_utf8(claim.payload().to_vec()).expect("utf-8 claim"),
            None => "anonymous".to_string(),
        }
    }

    fn default_auth() -> (Arc<JoseAuth>, String) {
        let pair = generate_pair();
        let auth = Arc::new(JoseAuth::new(JoseConfig::new(), StaticKeys::new(pair)));
        let token = auth
            .issue(&Identity {
                name: "with Jose".to_string(),
            })
            .expect("issue");
        (auth, token)
    }

    fn app(auth: Arc<JoseAuth>) -> Router {
        let router = Router::new().route("/", get(show_claim));
        apply(router, auth)
    }

    async fn body_text(response: Response) -> String {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        String::from_utf8(bytes.to_vec()).expect("utf-8 body")
    }

    fn get_request(uri: &str, auth_header: Option<String>) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder().uri(uri);
        if let Some(value) = auth_header {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(Body::empty()).expect("request")
    }

    #[tokio::test]
    async fn valid_bearer_token_reaches_the_handler() {
        let (auth, token) = default_auth();

        let response = app(auth)
            .oneshot(get_request("/", Some(format!("Bearer {token}"))))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("with Jose"), "body was: {body}");
    }

    #[tokio::test]
    async fn missing_token_is_rejected_with_401() {
        let (auth, _token) = default_auth();

        let response = app(auth)
            .oneshot(get_request("/", None))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_text(response).await;
        assert!(body.contains("required authorization token not found"));
    }

    #[tokio::test]
    async fn garbage_token_is_rejected_with_401() {
        let (auth, _token) = default_auth();

        let response = app(auth)
            .oneshot(get_request("/", Some("Bearer garbage".to_string())))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_text(response).await;
        assert!(body.contains("not a valid encrypted message"));
    }

    #[tokio::test]
    async fn wrong_scheme_is_a_format_error_not_a_missing_token() {
        let (auth, _token) = default_auth();

        let response = app(auth)
            .oneshot(get_request("/", Some("Basic xxx".to_string())))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_text(response).await;
        assert!(body.contains("authorization header format"));
    }

    #[tokio::test]
    async fn optional_credentials_continue_without_a_claim() {
        let pair = generate_pair();
        let config = JoseConfig::new().with_credentials_optional(true);
        let auth = Arc::new(JoseAuth::new(config, StaticKeys::new(pair)));

        let router = Router::new().route("/", get(show_optional_claim));
        let response = apply(router, auth)
            .oneshot(get_request("/", None))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "anonymous");
    }

    #[tokio::test]
    async fn optional_credentials_treat_an_empty_bearer_token_as_absent() {
        let pair = generate_pair();
        let config = JoseConfig::new().with_credentials_optional(true);
        let auth = Arc::new(JoseAuth::new(config, StaticKeys::new(pair)));

        let router = Router::new().route("/", get(show_optional_claim));
        let response = apply(router, auth)
            .oneshot(get_request("/", Some("Bearer ".to_string())))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "anonymous");
    }

    #[tokio::test]
    async fn optional_credentials_still_reject_an_invalid_token() {
        let pair = generate_pair();
        let config = JoseConfig::new().with_credentials_optional(true);
        let auth = Arc::new(JoseAuth::new(config, StaticKeys::new(pair)));

        let response = app(auth)
            .oneshot(get_request("/", Some("Bearer garbage".to_string())))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn options_requests_bypass_authentication_by_default() {
        let (auth, _token) = default_auth();

        let router = Router::new().route("/", get(show_claim).options(|| async { "preflight" }));
        let request = HttpRequest::builder()
            .method(Method::OPTIONS)
            .uri("/")
            .body(Body::empty())
            .expect("request");
        let response = apply(router, auth).oneshot(request).await.expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "preflight");
    }

    #[tokio::test]
    async fn auth_on_options_requires_a_token() {
        let pair = generate_pair();
        let config = JoseConfig::new().with_auth_on_options(true);
        let auth = Arc::new(JoseAuth::new(config, StaticKeys::new(pair)));

        let router = Router::new().route("/", get(show_claim).options(|| async { "preflight" }));
        let request = HttpRequest::builder()
            .method(Method::OPTIONS)
            .uri("/")
            .body(Body::empty())
            .expect("request");
        let response = apply(router, auth).oneshot(request).await.expect("response");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn custom_extractor_reads_the_query_parameter() {
        let pair = generate_pair();
        let auth = Arc::new(
            JoseAuth::builder(JoseConfig::new(), StaticKeys::new(pair))
                .with_extractor(
                    FromFirst::new()
                        .or(FromAuthHeader)
                        .or(FromParameter::new("token")),
                )
                .build(),
        );
        let token = auth
            .issue(&Identity {
                name: "with Jose".to_string(),
            })
            .expect("issue");

        let response = app(auth)
            .oneshot(get_request(&format!("/?token={token}"), None))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("with Jose"), "body was: {body}");
    }

    #[tokio::test]
    async fn custom_error_handler_replaces_the_response() {
        let pair = generate_pair();
        let auth = Arc::new(
            JoseAuth::builder(JoseConfig::new(), StaticKeys::new(pair))
                .with_error_handler(|_error: AuthError| {
                    (StatusCode::IM_A_TEAPOT, "nope").into_response()
                })
                .build(),
        );

        let response = app(auth)
            .oneshot(get_request("/", None))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
        assert_eq!(body_text(response).await, "nope");
    }
}
