pub mod constants;
pub mod error;
pub mod quote;
pub mod types;
pub mod utils;
pub mod verifier;

#[cfg(test)]
mod test_utils;

pub use error::{FailureKind, VerificationError};
pub use types::config::{QuoteLayout, VerifierConfig};
pub use types::report::{Report, ReportFields};
pub use types::{ExpectedIdentity, QuoteStatus, VerifiedOutput};
pub use utils::crypto::SignerKey;
pub use verifier::Verifier;

/// Verify an IAS attestation report signed directly by `(signer_modulus, signer_exponent)`.
///
/// 1. Rebuild the report body IAS signed from the borsh encoded `report` bundle.
/// 2. Verify `signature` over it (RSA PKCS#1 v1.5, SHA-256).
/// 3. Check the quote status and the enclave identity in the quote body.
///
/// Returns the 64 bytes of report data the enclave committed to.
pub fn verify_report(
    report: &[u8],
    signature: &[u8],
    signer_modulus: &[u8],
    signer_exponent: &[u8],
    expected_mrenclave: &[u8],
    expected_mrsigner: &[u8],
) -> error::Result<Vec<u8>> {
    Verifier::default().verify_report(
        report,
        signature,
        signer_modulus,
        signer_exponent,
        expected_mrenclave,
        expected_mrsigner,
    )
}

/// Like [`verify_report`], but the report signing key is taken from `leaf_certificate`
/// after checking that `(root_modulus, root_exponent)` signed it.
///
/// The certificate is verified before the report is looked at.
#[allow(clippy::too_many_arguments)]
pub fn verify_report_with_certificate(
    report: &[u8],
    signature: &[u8],
    leaf_certificate: &[u8],
    root_modulus: &[u8],
    root_exponent: &[u8],
    expected_mrenclave: &[u8],
    expected_mrsigner: &[u8],
) -> error::Result<Vec<u8>> {
    Verifier::default().verify_report_with_certificate(
        report,
        signature,
        leaf_certificate,
        root_modulus,
        root_exponent,
        expected_mrenclave,
        expected_mrsigner,
    )
}
