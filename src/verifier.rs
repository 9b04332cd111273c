use std::sync::Arc;

use josekit::{jwe, jws, JoseError};
use tracing::debug;

use crate::config::JoseConfig;
use crate::error::{AuthError, AuthResult};
use crate::keys::{KeyPair, KeySupplier};

/// Decrypt-then-verify pipeline for inbound tokens.
///
/// The stages run in a fixed order and every failure is terminal: key
/// supplier, JWE parse+decrypt with the private key, JWS parse+verify with
/// the public key. Each stage reports its own [`AuthError`] kind.
pub struct TokenVerifier {
    config: JoseConfig,
    keys: Arc<dyn KeySupplier>,
}

impl TokenVerifier {
    pub fn new(config: JoseConfig, keys: Arc<dyn KeySupplier>) -> Self {
        Self { config, keys }
    }

    /// Verify a serialized token and return the claim payload bytes.
    pub fn verify(&self, token: &str) -> AuthResult<Vec<u8>> {
        let pair = self
            .keys
            .keys()
            .map_err(|err| AuthError::KeySupplier(err.to_string()))?;

        let signed = self.decrypt(token, &pair)?;
        let payload = self.check_signature(&signed, &pair)?;
        debug!(bytes = payload.len(), "token verified");
        Ok(payload)
    }

    pub(crate) fn decrypt(&self, token: &str, pair: &KeyPair) -> AuthResult<Vec<u8>> {
        let decrypter = self.config.key_algorithm.decrypter(&pair.private_pem)?;
        let (plaintext, _header) =
            jwe::deserialize_compact(token, &decrypter).map_err(|err| match err {
                JoseError::InvalidJweFormat(source) => AuthError::NotEncrypted(source.to_string()),
                other => AuthError::Decryption(other.to_string()),
            })?;
        debug!(alg = %self.config.key_algorithm, "token decrypted");
        Ok(plaintext)
    }

    pub(crate) fn check_signature(&self, signed: &[u8], pair: &KeyPair) -> AuthResult<Vec<u8>> {
        let verifier = self.config.signature_algorithm.verifier(&pair.public_pem)?;
        let signed = std::str::from_utf8(signed).map_err(|err| AuthError::NotSigned(err.to_string()))?;
        let (payload, _header) =
            jws::deserialize_compact(signed, &verifier).map_err(|err| match err {
                JoseError::InvalidJwsFormat(source) => AuthError::NotSigned(source.to_string()),
                other => AuthError::Verification(other.to_string()),
            })?;
        debug!(alg = %self.config.signature_algorithm, "signature verified");
        Ok(payload)
    }
}
