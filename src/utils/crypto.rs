use rsa::traits::PublicKeyParts;
use rsa::{BigUint, Pkcs1v15Sign, RsaPublicKey};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{Result, VerificationError};

/// An RSA public key used to check an IAS signature, either the report signing
/// key itself or the root key that signed its certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerKey(RsaPublicKey);

impl SignerKey {
    /// Build a key from big-endian modulus and exponent bytes. Leading zero bytes are ignored.
    pub fn from_parts(modulus: &[u8], exponent: &[u8]) -> Result<Self> {
        if modulus.iter().all(|b| *b == 0) {
            return Err(VerificationError::InvalidSignerKey("empty modulus".into()));
        }
        if exponent.iter().all(|b| *b == 0) {
            return Err(VerificationError::InvalidSignerKey("empty exponent".into()));
        }

        RsaPublicKey::new(
            BigUint::from_bytes_be(modulus),
            BigUint::from_bytes_be(exponent),
        )
        .map(Self)
        .map_err(|e| VerificationError::InvalidSignerKey(e.to_string()))
    }

    pub fn modulus(&self) -> Vec<u8> {
        self.0.n().to_bytes_be()
    }

    pub fn exponent(&self) -> Vec<u8> {
        self.0.e().to_bytes_be()
    }

    /// Modulus size in bits.
    pub fn bits(&self) -> usize {
        self.0.size() * 8
    }
}

impl From<RsaPublicKey> for SignerKey {
    fn from(key: RsaPublicKey) -> Self {
        Self(key)
    }
}

pub fn sha256sum(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let mut output = [0; 32];
    output.copy_from_slice(&hasher.finalize());
    output
}

// verify_rsa_signature verifies an RSASSA-PKCS1-v1_5 signature with SHA-256,
// the scheme IAS uses for both its reports and its signing certificate.
// The message is hashed here; the signature must be exactly the modulus size.
// Returns true if the signature is valid, false otherwise.
pub fn verify_rsa_signature(message: &[u8], signature: &[u8], key: &SignerKey) -> bool {
    let digest = sha256sum(message);
    debug!(
        message_len = message.len(),
        digest = %hex::encode(digest),
        key_bits = key.bits(),
        "verifying rsa signature"
    );
    key.0
        .verify(Pkcs1v15Sign::new::<Sha256>(), &digest, signature)
        .is_ok()
}
