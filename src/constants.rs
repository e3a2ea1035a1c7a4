// https://api.trustedservices.intel.com/documents/sgx-attestation-api-spec.pdf

pub const EPID_QUOTE_HEADER_LEN: usize = 48;
pub const ENCLAVE_REPORT_LEN: usize = 384;

/// Length of the decoded `isvEnclaveQuoteBody`: quote header plus the ISV enclave report.
/// The EPID signature is stripped by IAS.
pub const QUOTE_BODY_LEN: usize = EPID_QUOTE_HEADER_LEN + ENCLAVE_REPORT_LEN;

pub const MRENCLAVE_OFFSET: usize = EPID_QUOTE_HEADER_LEN + 64;
pub const MRSIGNER_OFFSET: usize = EPID_QUOTE_HEADER_LEN + 128;
pub const REPORT_DATA_OFFSET: usize = EPID_QUOTE_HEADER_LEN + 320;

pub const MEASUREMENT_LEN: usize = 32;
pub const REPORT_DATA_LEN: usize = 64;

pub const STATUS_OK: &str = "OK";
pub const STATUS_SW_HARDENING_NEEDED: &str = "SW_HARDENING_NEEDED";

// RFC 8017 / RFC 4055
pub const RSA_ENCRYPTION_OID: &str = "1.2.840.113549.1.1.1";
pub const SHA256_WITH_RSA_ENCRYPTION_OID: &str = "1.2.840.113549.1.1.11";
