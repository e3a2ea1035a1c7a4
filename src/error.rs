use crate::types::QuoteStatus;

/// Terminal failure states of a verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The evidence was well formed but does not describe a trusted enclave,
    /// or a signature did not verify.
    Rejected,
    /// The caller broke the input contract (bad framing, wrong lengths, unparseable keys).
    Malformed,
}

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("failed to decode report bundle: {0}")]
    ReportEncoding(#[from] std::io::Error),

    #[error("invalid report field `{field}`: {reason}")]
    InvalidReportField { field: &'static str, reason: String },

    #[error("invalid quote body length, expected {expected} bytes but got {actual}")]
    QuoteBodyLength { expected: usize, actual: usize },

    #[error("invalid {field} length, expected 32 bytes but got {actual}")]
    IdentityLength { field: &'static str, actual: usize },

    #[error("invalid rsa public key: {0}")]
    InvalidSignerKey(String),

    #[error("malformed leaf certificate: {0:#}")]
    MalformedCertificate(anyhow::Error),

    #[error("unsupported leaf certificate algorithm {0}")]
    UnsupportedCertificate(String),

    #[error("invalid verifier config: {0}")]
    InvalidConfig(String),

    #[error("report signature verification failed")]
    ReportSignature,

    #[error("leaf certificate signature verification failed")]
    CertificateSignature,

    #[error("quote status {0} is not trusted")]
    DisallowedStatus(QuoteStatus),

    #[error("invalid mrenclave, expected {expected} but got {actual}")]
    MrEnclaveMismatch { expected: String, actual: String },

    #[error("invalid mrsigner, expected {expected} but got {actual}")]
    MrSignerMismatch { expected: String, actual: String },
}

impl VerificationError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::ReportSignature
            | Self::CertificateSignature
            | Self::DisallowedStatus(_)
            | Self::MrEnclaveMismatch { .. }
            | Self::MrSignerMismatch { .. } => FailureKind::Rejected,
            Self::ReportEncoding(_)
            | Self::InvalidReportField { .. }
            | Self::QuoteBodyLength { .. }
            | Self::IdentityLength { .. }
            | Self::InvalidSignerKey(_)
            | Self::MalformedCertificate(_)
            | Self::UnsupportedCertificate(_)
            | Self::InvalidConfig(_) => FailureKind::Malformed,
        }
    }

    pub(crate) fn field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidReportField {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VerificationError>;
