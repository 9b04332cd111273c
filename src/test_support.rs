use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::rand_core::OsRng;
use rsa::RsaPrivateKey;

use crate::keys::KeyPair;

pub(crate) fn generate_pair() -> KeyPair {
    let mut rng = OsRng;
    let private_key = RsaPrivateKey::new(&mut rng, 2048).expect("key generation");
    let public_key = private_key.to_public_key();

    let private_pem = private_key.to_pkcs8_pem(LineEnding::LF).expect("private pem");
    let public_pem = public_key
        .to_public_key_pem(LineEnding::LF)
        .expect("public pem");

    KeyPair::new(private_pem.as_bytes(), public_pem.as_bytes())
}
