use anyhow::{bail, Context};
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::RsaPublicKey;
use tracing::{debug, warn};
use x509_cert::der::oid::ObjectIdentifier;
use x509_cert::der::{Decode, Encode};
use x509_cert::Certificate;

use crate::constants::{RSA_ENCRYPTION_OID, SHA256_WITH_RSA_ENCRYPTION_OID};
use crate::error::{Result, VerificationError};
use crate::utils::crypto::{verify_rsa_signature, SignerKey};

const RSA_ENCRYPTION: ObjectIdentifier = ObjectIdentifier::new_unwrap(RSA_ENCRYPTION_OID);
const SHA256_WITH_RSA_ENCRYPTION: ObjectIdentifier =
    ObjectIdentifier::new_unwrap(SHA256_WITH_RSA_ENCRYPTION_OID);

/// Returns the DER of the first certificate in a PEM bundle, such as the
/// `X-IASReport-Signing-Certificate` header (once url-decoded).
pub fn parse_pem_certificate(pem: &str) -> Result<Vec<u8>> {
    first_pem_certificate(pem).map_err(VerificationError::MalformedCertificate)
}

fn first_pem_certificate(pem: &str) -> anyhow::Result<Vec<u8>> {
    let blocks = pem::parse_many(pem).context("failed to parse pem")?;
    blocks
        .into_iter()
        .find(|block| block.tag() == "CERTIFICATE")
        .map(|block| block.into_contents())
        .context("no CERTIFICATE block found")
}

fn parse_der(der: &[u8]) -> anyhow::Result<Certificate> {
    let cert = Certificate::from_der(der).context("failed to decode certificate")?;

    if cert.signature_algorithm.oid != cert.tbs_certificate.signature.oid {
        bail!(
            "signature algorithm {} does not match tbs signature algorithm {}",
            cert.signature_algorithm.oid,
            cert.tbs_certificate.signature.oid
        );
    }

    Ok(cert)
}

/// Verify that `root` signed the leaf certificate and return the leaf's own key.
///
/// This is a single hop: there is no chain building, no revocation and no
/// validity period check.
pub fn verify_leaf_certificate(der: &[u8], root: &SignerKey) -> Result<SignerKey> {
    let cert = parse_der(der).map_err(VerificationError::MalformedCertificate)?;

    if cert.signature_algorithm.oid != SHA256_WITH_RSA_ENCRYPTION {
        return Err(VerificationError::UnsupportedCertificate(format!(
            "signature algorithm {}",
            cert.signature_algorithm.oid
        )));
    }

    let tbs = cert
        .tbs_certificate
        .to_der()
        .context("failed to encode tbs certificate")
        .map_err(VerificationError::MalformedCertificate)?;
    let signature = cert
        .signature
        .as_bytes()
        .context("certificate signature has unused bits")
        .map_err(VerificationError::MalformedCertificate)?;

    if !verify_rsa_signature(&tbs, signature, root) {
        warn!(
            subject = %cert.tbs_certificate.subject,
            "leaf certificate is not signed by the root key"
        );
        return Err(VerificationError::CertificateSignature);
    }

    let spki = &cert.tbs_certificate.subject_public_key_info;
    if spki.algorithm.oid != RSA_ENCRYPTION {
        return Err(VerificationError::UnsupportedCertificate(format!(
            "public key algorithm {}",
            spki.algorithm.oid
        )));
    }

    let leaf = RsaPublicKey::from_pkcs1_der(spki.subject_public_key.raw_bytes())
        .context("failed to decode leaf rsa public key")
        .map_err(VerificationError::MalformedCertificate)?;

    let leaf = SignerKey::from(leaf);
    debug!(
        subject = %cert.tbs_certificate.subject,
        key_bits = leaf.bits(),
        "verified leaf certificate"
    );
    Ok(leaf)
}
