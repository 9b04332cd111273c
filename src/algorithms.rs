use std::fmt;

use josekit::jwe::alg::rsaes::{RsaesJweDecrypter, RsaesJweEncrypter};
use josekit::jwe::{RSA_OAEP, RSA_OAEP_256};
use josekit::jws::alg::rsassa::{RsassaJwsSigner, RsassaJwsVerifier};
use josekit::jws::{RS256, RS384, RS512};

use crate::error::{AuthError, AuthResult};

/// Key-management algorithm used for the outer encrypted (JWE) layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyAlgorithm {
    RsaOaep,
    #[default]
    RsaOaep256,
}

impl KeyAlgorithm {
    pub fn name(self) -> &'static str {
        match self {
            KeyAlgorithm::RsaOaep => "RSA-OAEP",
            KeyAlgorithm::RsaOaep256 => "RSA-OAEP-256",
        }
    }

    pub(crate) fn encrypter(self, public_pem: &[u8]) -> AuthResult<RsaesJweEncrypter> {
        let result = match self {
            KeyAlgorithm::RsaOaep => RSA_OAEP.encrypter_from_pem(public_pem),
            KeyAlgorithm::RsaOaep256 => RSA_OAEP_256.encrypter_from_pem(public_pem),
        };
        result.map_err(|err| AuthError::KeyParse(self.name(), err.to_string()))
    }

    pub(crate) fn decrypter(self, private_pem: &[u8]) -> AuthResult<RsaesJweDecrypter> {
        let result = match self {
            KeyAlgorithm::RsaOaep => RSA_OAEP.decrypter_from_pem(private_pem),
            KeyAlgorithm::RsaOaep256 => RSA_OAEP_256.decrypter_from_pem(private_pem),
        };
        result.map_err(|err| AuthError::KeyParse(self.name(), err.to_string()))
    }
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Signature algorithm used for the inner signed (JWS) layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    Rs256,
    Rs384,
    #[default]
    Rs512,
}

impl SignatureAlgorithm {
    pub fn name(self) -> &'static str {
        match self {
            SignatureAlgorithm::Rs256 => "RS256",
            SignatureAlgorithm::Rs384 => "RS384",
            SignatureAlgorithm::Rs512 => "RS512",
        }
    }

    pub(crate) fn signer(self, private_pem: &[u8]) -> AuthResult<RsassaJwsSigner> {
        let result = match self {
            SignatureAlgorithm::Rs256 => RS256.signer_from_pem(private_pem),
            SignatureAlgorithm::Rs384 => RS384.signer_from_pem(private_pem),
            SignatureAlgorithm::Rs512 => RS512.signer_from_pem(private_pem),
        };
        result.map_err(|err| AuthError::KeyParse(self.name(), err.to_string()))
    }

    pub(crate) fn verifier(self, public_pem: &[u8]) -> AuthResult<RsassaJwsVerifier> {
        let result = match self {
            SignatureAlgorithm::Rs256 => RS256.verifier_from_pem(public_pem),
            SignatureAlgorithm::Rs384 => RS384.verifier_from_pem(public_pem),
            SignatureAlgorithm::Rs512 => RS512.verifier_from_pem(public_pem),
        };
        result.map_err(|err| AuthError::KeyParse(self.name(), err.to_string()))
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Content-encryption algorithm named in the JWE `enc` header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContentEncryption {
    A128CbcHs256,
    A192CbcHs384,
    #[default]
    A256CbcHs512,
    A128Gcm,
    A192Gcm,
    A256Gcm,
}

impl ContentEncryption {
    pub fn name(self) -> &'static str {
        match self {
            ContentEncryption::A128CbcHs256 => "A128CBC-HS256",
            ContentEncryption::A192CbcHs384 => "A192CBC-HS384",
            ContentEncryption::A256CbcHs512 => "A256CBC-HS512",
            ContentEncryption::A128Gcm => "A128GCM",
            ContentEncryption::A192Gcm => "A192GCM",
            ContentEncryption::A256Gcm => "A256GCM",
        }
    }
}

impl fmt::Display for ContentEncryption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
