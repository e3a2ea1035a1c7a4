use serde::{Deserialize, Serialize};

use crate::constants::{
    MEASUREMENT_LEN, MRENCLAVE_OFFSET, MRSIGNER_OFFSET, QUOTE_BODY_LEN, REPORT_DATA_LEN,
    REPORT_DATA_OFFSET,
};
use crate::error::{Result, VerificationError};

/// Fixed positions of the identity fields and the payload inside the quote body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct QuoteLayout {
    pub quote_body_len: usize,
    pub mrenclave_offset: usize,
    pub mrsigner_offset: usize,
    pub payload_offset: usize,
    pub payload_len: usize,
}

impl Default for QuoteLayout {
    fn default() -> Self {
        Self {
            quote_body_len: QUOTE_BODY_LEN,
            mrenclave_offset: MRENCLAVE_OFFSET,
            mrsigner_offset: MRSIGNER_OFFSET,
            payload_offset: REPORT_DATA_OFFSET,
            payload_len: REPORT_DATA_LEN,
        }
    }
}

impl QuoteLayout {
    /// Every region has to fit inside the quote body and the payload may not
    /// exceed the report data size.
    pub fn validate(&self) -> Result<()> {
        if self.payload_len > REPORT_DATA_LEN {
            return Err(VerificationError::InvalidConfig(format!(
                "payload length {} exceeds {} bytes",
                self.payload_len, REPORT_DATA_LEN
            )));
        }

        let regions = [
            ("mrenclave", self.mrenclave_offset, MEASUREMENT_LEN),
            ("mrsigner", self.mrsigner_offset, MEASUREMENT_LEN),
            ("payload", self.payload_offset, self.payload_len),
        ];
        for (name, offset, len) in regions {
            match offset.checked_add(len) {
                Some(end) if end <= self.quote_body_len => {}
                _ => {
                    return Err(VerificationError::InvalidConfig(format!(
                        "{name} region at offset {offset} with length {len} exceeds the {} byte quote body",
                        self.quote_body_len
                    )))
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VerifierConfig {
    pub layout: QuoteLayout,
}

impl VerifierConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: VerifierConfig = serde_json::from_str(json)
            .map_err(|e| VerificationError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.layout.validate()
    }
}
