use std::sync::Arc;

use josekit::jwe::{self, JweHeader};
use josekit::jws::{self, JwsHeader};
use serde::Serialize;
use tracing::debug;

use crate::config::JoseConfig;
use crate::error::{AuthError, AuthResult};
use crate::keys::{KeyPair, KeySupplier};

/// Sign-then-encrypt pipeline for outbound tokens.
///
/// Structural inverse of [`TokenVerifier`](crate::verifier::TokenVerifier):
/// whatever one configuration issues, the same configuration verifies.
pub struct TokenIssuer {
    config: JoseConfig,
    keys: Arc<dyn KeySupplier>,
}

impl TokenIssuer {
    pub fn new(config: JoseConfig, keys: Arc<dyn KeySupplier>) -> Self {
        Self { config, keys }
    }

    /// Serialize a claim to JSON, sign it, and encrypt the signed object
    /// into a compact token.
    pub fn issue<T: Serialize>(&self, claim: &T) -> AuthResult<String> {
        let pair = self
            .keys
            .keys()
            .map_err(|err| AuthError::KeySupplier(err.to_string()))?;

        let payload = serde_json::to_vec(claim)
            .map_err(|err| AuthError::ClaimSerialization(err.to_string()))?;
        let signed = self.sign(&payload, &pair)?;
        let token = self.encrypt(signed.as_bytes(), &pair)?;
        debug!("token issued");
        Ok(token)
    }

    pub(crate) fn sign(&self, payload: &[u8], pair: &KeyPair) -> AuthResult<String> {
        let signer = self.config.signature_algorithm.signer(&pair.private_pem)?;
        let header = JwsHeader::new();
        jws::serialize_compact(payload, &header, &signer)
            .map_err(|err| AuthError::Signing(err.to_string()))
    }

    pub(crate) fn encrypt(&self, signed: &[u8], pair: &KeyPair) -> AuthResult<String> {
        let encrypter = self.config.key_algorithm.encrypter(&pair.public_pem)?;
        let mut header = JweHeader::new();
        header.set_content_encryption(self.config.content_encryption.name());
        jwe::serialize_compact(signed, &header, &encrypter)
            .map_err(|err| AuthError::Encryption(err.to_string()))
    }
}
