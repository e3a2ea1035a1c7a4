use tracing::{debug, warn};

use crate::error::{Result, VerificationError};
use crate::quote::validate_quote;
use crate::types::config::VerifierConfig;
use crate::types::report::{Report, ReportFields};
use crate::types::{ExpectedIdentity, VerifiedOutput};
use crate::utils::cert::verify_leaf_certificate;
use crate::utils::crypto::{sha256sum, verify_rsa_signature, SignerKey};
use crate::utils::report::build_report_message;

/// Verifies IAS attestation reports against a fixed quote layout.
#[derive(Debug, Clone, Default)]
pub struct Verifier {
    config: VerifierConfig,
}

impl Verifier {
    pub fn new(config: VerifierConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Verify a borsh encoded report bundle signed directly by the key
    /// `(signer_modulus, signer_exponent)` and return the enclave payload.
    pub fn verify_report(
        &self,
        report: &[u8],
        signature: &[u8],
        signer_modulus: &[u8],
        signer_exponent: &[u8],
        expected_mrenclave: &[u8],
        expected_mrsigner: &[u8],
    ) -> Result<Vec<u8>> {
        let identity = ExpectedIdentity::from_slices(expected_mrenclave, expected_mrsigner)?;
        let signer = SignerKey::from_parts(signer_modulus, signer_exponent)?;
        let fields = ReportFields::decode(report)?;

        self.verify(&fields, signature, &signer, &identity)
            .map(|output| output.payload)
    }

    /// Verify a borsh encoded report bundle signed by the key of
    /// `leaf_certificate`, which itself must be signed by
    /// `(root_modulus, root_exponent)`, and return the enclave payload.
    #[allow(clippy::too_many_arguments)]
    pub fn verify_report_with_certificate(
        &self,
        report: &[u8],
        signature: &[u8],
        leaf_certificate: &[u8],
        root_modulus: &[u8],
        root_exponent: &[u8],
        expected_mrenclave: &[u8],
        expected_mrsigner: &[u8],
    ) -> Result<Vec<u8>> {
        let identity = ExpectedIdentity::from_slices(expected_mrenclave, expected_mrsigner)?;
        let root = SignerKey::from_parts(root_modulus, root_exponent)?;

        let awaiting_report =
            AwaitingCertVerification::new(root).verify_certificate(leaf_certificate)?;
        let fields = ReportFields::decode(report)?;

        awaiting_report
            .verify_signature(fields, signature)?
            .validate(&self.config, &identity)
            .map(|output| output.payload)
    }

    /// Run the whole pipeline on already decoded fields with a trusted signer key.
    pub fn verify(
        &self,
        fields: &ReportFields,
        signature: &[u8],
        signer: &SignerKey,
        identity: &ExpectedIdentity,
    ) -> Result<VerifiedOutput> {
        AwaitingReportVerification::new(signer.clone())
            .verify_signature(fields.clone(), signature)?
            .validate(&self.config, identity)
    }
}

/// First hop of the certificate variant: only the root key is trusted.
#[derive(Debug)]
pub struct AwaitingCertVerification {
    root: SignerKey,
}

impl AwaitingCertVerification {
    pub fn new(root: SignerKey) -> Self {
        Self { root }
    }

    pub fn verify_certificate(self, leaf_certificate: &[u8]) -> Result<AwaitingReportVerification> {
        let leaf = verify_leaf_certificate(leaf_certificate, &self.root)?;
        Ok(AwaitingReportVerification { signer: leaf })
    }
}

/// The signer key is trusted, the report is not.
#[derive(Debug)]
pub struct AwaitingReportVerification {
    signer: SignerKey,
}

impl AwaitingReportVerification {
    /// Start from a signer key the caller vouches for.
    pub fn new(signer: SignerKey) -> Self {
        Self { signer }
    }

    pub fn signer(&self) -> &SignerKey {
        &self.signer
    }

    pub fn verify_signature(
        self,
        fields: ReportFields,
        signature: &[u8],
    ) -> Result<AwaitingContentValidation> {
        let report = Report::try_from(fields)?;
        let message = build_report_message(&report);
        debug!(
            report_id = %report.id,
            message_len = message.len(),
            message_digest = %hex::encode(sha256sum(&message)),
            "rebuilt report message"
        );

        if !verify_rsa_signature(&message, signature, &self.signer) {
            // A canonicalization mismatch looks exactly like a forged signature.
            warn!(report_id = %report.id, "report signature verification failed");
            return Err(VerificationError::ReportSignature);
        }

        Ok(AwaitingContentValidation { report })
    }
}

/// The report is authentic; its content has not been checked yet.
#[derive(Debug)]
pub struct AwaitingContentValidation {
    report: Report,
}

impl AwaitingContentValidation {
    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn validate(
        self,
        config: &VerifierConfig,
        identity: &ExpectedIdentity,
    ) -> Result<VerifiedOutput> {
        let (quote_status, payload) = validate_quote(&self.report, &config.layout, identity)?;
        debug!(report_id = %self.report.id, %quote_status, "report accepted");

        let Report {
            advisory_ids,
            quote_body,
            ..
        } = self.report;

        Ok(VerifiedOutput {
            quote_status,
            advisory_ids: advisory_ids.map(|ids| ids.ids).unwrap_or_default(),
            quote_body,
            payload,
        })
    }
}
