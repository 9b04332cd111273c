pub mod algorithms;
pub mod claim;
pub mod config;
pub mod error;
pub mod extract;
pub mod issuer;
pub mod keys;
pub mod middleware;
pub mod verifier;

#[cfg(test)]
pub(crate) mod test_support;

pub use algorithms::{ContentEncryption, KeyAlgorithm, SignatureAlgorithm};
pub use claim::VerifiedClaim;
pub use config::JoseConfig;
pub use error::{AuthError, AuthResult};
pub use extract::{FromAuthHeader, FromFirst, FromParameter, TokenExtractor};
pub use issuer::TokenIssuer;
pub use keys::{KeyPair, KeySupplier, StaticKeys};
pub use middleware::{apply, DefaultErrorHandler, ErrorHandler, JoseAuth, JoseAuthBuilder};
pub use verifier::TokenVerifier;
