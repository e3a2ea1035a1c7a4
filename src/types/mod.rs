use std::fmt;

use serde::{Deserialize, Serialize};
use zerocopy::FromBytes;

use crate::constants::{MEASUREMENT_LEN, STATUS_OK, STATUS_SW_HARDENING_NEEDED};
use crate::error::{Result, VerificationError};

use self::quote::EpidQuote;

pub mod config;
pub mod quote;
pub mod report;

/// The `isvEnclaveQuoteStatus` values reported by IAS. Serialized as the IAS text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuoteStatus {
    Ok,
    SignatureInvalid,
    GroupRevoked,
    SignatureRevoked,
    KeyRevoked,
    SigrlVersionMismatch,
    GroupOutOfDate,
    ConfigurationNeeded,
    SwHardeningNeeded,
    ConfigurationAndSwHardeningNeeded,
    Unrecognized(String),
}

impl QuoteStatus {
    pub fn from_str(s: &str) -> Self {
        match s {
            STATUS_OK => QuoteStatus::Ok,
            "SIGNATURE_INVALID" => QuoteStatus::SignatureInvalid,
            "GROUP_REVOKED" => QuoteStatus::GroupRevoked,
            "SIGNATURE_REVOKED" => QuoteStatus::SignatureRevoked,
            "KEY_REVOKED" => QuoteStatus::KeyRevoked,
            "SIGRL_VERSION_MISMATCH" => QuoteStatus::SigrlVersionMismatch,
            "GROUP_OUT_OF_DATE" => QuoteStatus::GroupOutOfDate,
            "CONFIGURATION_NEEDED" => QuoteStatus::ConfigurationNeeded,
            STATUS_SW_HARDENING_NEEDED => QuoteStatus::SwHardeningNeeded,
            "CONFIGURATION_AND_SW_HARDENING_NEEDED" => {
                QuoteStatus::ConfigurationAndSwHardeningNeeded
            }
            other => QuoteStatus::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            QuoteStatus::Ok => STATUS_OK,
            QuoteStatus::SignatureInvalid => "SIGNATURE_INVALID",
            QuoteStatus::GroupRevoked => "GROUP_REVOKED",
            QuoteStatus::SignatureRevoked => "SIGNATURE_REVOKED",
            QuoteStatus::KeyRevoked => "KEY_REVOKED",
            QuoteStatus::SigrlVersionMismatch => "SIGRL_VERSION_MISMATCH",
            QuoteStatus::GroupOutOfDate => "GROUP_OUT_OF_DATE",
            QuoteStatus::ConfigurationNeeded => "CONFIGURATION_NEEDED",
            QuoteStatus::SwHardeningNeeded => STATUS_SW_HARDENING_NEEDED,
            QuoteStatus::ConfigurationAndSwHardeningNeeded => {
                "CONFIGURATION_AND_SW_HARDENING_NEEDED"
            }
            QuoteStatus::Unrecognized(s) => s,
        }
    }

    /// Only a fully up to date platform, or one that is up to date apart from
    /// software mitigations the enclave is expected to carry, is trusted.
    pub fn is_trusted(&self) -> bool {
        matches!(self, QuoteStatus::Ok | QuoteStatus::SwHardeningNeeded)
    }
}

impl From<String> for QuoteStatus {
    fn from(s: String) -> Self {
        QuoteStatus::from_str(&s)
    }
}

impl From<QuoteStatus> for String {
    fn from(status: QuoteStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The allow-listed enclave identity the caller expects the quote to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedIdentity {
    #[serde(with = "hex")]
    pub mr_enclave: [u8; MEASUREMENT_LEN],
    #[serde(with = "hex")]
    pub mr_signer: [u8; MEASUREMENT_LEN],
}

impl ExpectedIdentity {
    pub fn new(mr_enclave: [u8; MEASUREMENT_LEN], mr_signer: [u8; MEASUREMENT_LEN]) -> Self {
        Self {
            mr_enclave,
            mr_signer,
        }
    }

    pub fn from_slices(mr_enclave: &[u8], mr_signer: &[u8]) -> Result<Self> {
        let mr_enclave = mr_enclave
            .try_into()
            .map_err(|_| VerificationError::IdentityLength {
                field: "mrenclave",
                actual: mr_enclave.len(),
            })?;
        let mr_signer = mr_signer
            .try_into()
            .map_err(|_| VerificationError::IdentityLength {
                field: "mrsigner",
                actual: mr_signer.len(),
            })?;
        Ok(Self::new(mr_enclave, mr_signer))
    }
}

/// Result of a successful verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedOutput {
    /// Either `OK` or `SW_HARDENING_NEEDED`.
    pub quote_status: QuoteStatus,
    /// Advisories IAS attached to the report, empty when none were reported.
    pub advisory_ids: Vec<String>,
    /// The decoded `isvEnclaveQuoteBody`.
    pub quote_body: Vec<u8>,
    /// The report data region chosen by the enclave.
    pub payload: Vec<u8>,
}

impl VerifiedOutput {
    /// Typed view of the quote body. Returns `None` when a custom layout with a
    /// different quote size was used.
    pub fn epid_quote(&self) -> Option<EpidQuote> {
        EpidQuote::read_from(self.quote_body.as_slice())
    }
}
