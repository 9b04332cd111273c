use crate::algorithms::{ContentEncryption, KeyAlgorithm, SignatureAlgorithm};

/// Runtime configuration for token issuance and verification.
#[derive(Debug, Clone, Default)]
pub struct JoseConfig {
    /// Key-management algorithm for the encrypted layer.
    pub key_algorithm: KeyAlgorithm,
    /// Signature algorithm for the signed layer.
    pub signature_algorithm: SignatureAlgorithm,
    /// Content-encryption algorithm for the encrypted layer.
    pub content_encryption: ContentEncryption,
    /// Continue without a stored claim when no token is present.
    pub credentials_optional: bool,
    /// Authenticate OPTIONS requests instead of letting them through.
    pub auth_on_options: bool,
}

impl JoseConfig {
    /// Construct config with the default algorithm suite
    /// (RSA-OAEP-256 / A256CBC-HS512 / RS512).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key_algorithm(mut self, algorithm: KeyAlgorithm) -> Self {
        self.key_algorithm = algorithm;
        self
    }

    pub fn with_signature_algorithm(mut self, algorithm: SignatureAlgorithm) -> Self {
        self.signature_algorithm = algorithm;
        self
    }

    pub fn with_content_encryption(mut self, encryption: ContentEncryption) -> Self {
        self.content_encryption = encryption;
        self
    }

    pub fn with_credentials_optional(mut self, optional: bool) -> Self {
        self.credentials_optional = optional;
        self
    }

    pub fn with_auth_on_options(mut self, enabled: bool) -> Self {
        self.auth_on_options = enabled;
        self
    }
}
