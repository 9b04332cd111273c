use std::fmt;

use axum::BoxError;

/// PEM-encoded key material for one recipient/sender pair.
///
/// The private key decrypts inbound tokens and signs outbound ones; the
/// public key verifies inbound signatures and encrypts outbound tokens.
#[derive(Clone)]
pub struct KeyPair {
    pub private_pem: Vec<u8>,
    pub public_pem: Vec<u8>,
}

impl KeyPair {
    pub fn new(private_pem: impl Into<Vec<u8>>, public_pem: impl Into<Vec<u8>>) -> Self {
        Self {
            private_pem: private_pem.into(),
            public_pem: public_pem.into(),
        }
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Key material stays out of logs.
        f.debug_struct("KeyPair").finish_non_exhaustive()
    }
}

/// Supplies the key pair for each verify/issue call.
///
/// Invoked lazily on every operation and never cached by the middleware, so
/// implementations may rotate keys between requests. Must be safe for
/// concurrent invocation (enforced by the `Send + Sync` bounds).
pub trait KeySupplier: Send + Sync {
    fn keys(&self) -> Result<KeyPair, BoxError>;
}

impl<F> KeySupplier for F
where
    F: Fn() -> Result<KeyPair, BoxError> + Send + Sync,
{
    fn keys(&self) -> Result<KeyPair, BoxError> {
        self()
    }
}

/// Key supplier backed by a fixed in-memory pair.
#[derive(Debug, Clone)]
pub struct StaticKeys {
    pair: KeyPair,
}

impl StaticKeys {
    pub fn new(pair: KeyPair) -> Self {
        Self { pair }
    }
}

impl KeySupplier for StaticKeys {
    fn keys(&self) -> Result<KeyPair, BoxError> {
        Ok(self.pair.clone())
    }
}
