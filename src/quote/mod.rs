use tracing::warn;

use crate::constants::MEASUREMENT_LEN;
use crate::error::{Result, VerificationError};
use crate::types::config::QuoteLayout;
use crate::types::report::Report;
use crate::types::{ExpectedIdentity, QuoteStatus};
use crate::utils::{read_array, read_slice};

/// Check the quote status and the enclave identity carried in the quote body,
/// and return the payload the enclave embedded in it.
///
/// The report signature must already have been verified.
pub fn validate_quote(
    report: &Report,
    layout: &QuoteLayout,
    expected: &ExpectedIdentity,
) -> Result<(QuoteStatus, Vec<u8>)> {
    // 1. Only OK and SW_HARDENING_NEEDED are trusted.
    let status = QuoteStatus::from_str(&report.quote_status);
    if !status.is_trusted() {
        warn!(%status, "untrusted quote status");
        return Err(VerificationError::DisallowedStatus(status));
    }

    // 2. Anything but the fixed structure size is truncated or foreign input.
    let quote_body = report.quote_body.as_slice();
    if quote_body.len() != layout.quote_body_len {
        return Err(VerificationError::QuoteBodyLength {
            expected: layout.quote_body_len,
            actual: quote_body.len(),
        });
    }

    // 3. Compare the identity fields byte for byte.
    let mr_enclave = read_measurement(quote_body, layout.mrenclave_offset, "mrenclave")?;
    if mr_enclave != expected.mr_enclave {
        warn!(mrenclave = %hex::encode(mr_enclave), "unexpected mrenclave");
        return Err(VerificationError::MrEnclaveMismatch {
            expected: hex::encode(expected.mr_enclave),
            actual: hex::encode(mr_enclave),
        });
    }

    let mr_signer = read_measurement(quote_body, layout.mrsigner_offset, "mrsigner")?;
    if mr_signer != expected.mr_signer {
        warn!(mrsigner = %hex::encode(mr_signer), "unexpected mrsigner");
        return Err(VerificationError::MrSignerMismatch {
            expected: hex::encode(expected.mr_signer),
            actual: hex::encode(mr_signer),
        });
    }

    // 4. The payload is opaque, hand it back untouched.
    let (offset, len) = (layout.payload_offset, layout.payload_len);
    let payload = read_slice(quote_body, offset, len)
        .ok_or_else(|| region_error("payload", offset, len, quote_body.len()))?
        .to_vec();

    Ok((status, payload))
}

fn read_measurement(
    quote_body: &[u8],
    offset: usize,
    name: &'static str,
) -> Result<[u8; MEASUREMENT_LEN]> {
    read_array::<MEASUREMENT_LEN>(quote_body, offset)
        .ok_or_else(|| region_error(name, offset, MEASUREMENT_LEN, quote_body.len()))
}

fn region_error(name: &str, offset: usize, len: usize, available: usize) -> VerificationError {
    VerificationError::InvalidConfig(format!(
        "{name} region at offset {offset} with length {len} exceeds the {available} byte quote body"
    ))
}
