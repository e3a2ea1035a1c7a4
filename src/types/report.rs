use base64ct::{Base64, Encoding};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::error::{Result, VerificationError};

/// The eight fields of an IAS attestation verification report, as handed over by the caller.
///
/// Text fields hold the exact (still JSON escaped) contents of the string members of the
/// signed report body, `advisory_ids` the raw JSON array and `version` the raw JSON number.
/// The quote body is already base64 decoded. Optional fields are empty when absent.
///
/// On the wire the bundle is the borsh encoding of this struct.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct ReportFields {
    pub id: Vec<u8>,
    pub timestamp: Vec<u8>,
    pub version: Vec<u8>,
    pub epid_pseudonym: Vec<u8>,
    pub advisory_url: Vec<u8>,
    pub advisory_ids: Vec<u8>,
    pub isv_enclave_quote_status: Vec<u8>,
    #[serde(with = "hex")]
    pub isv_enclave_quote_body: Vec<u8>,
}

impl ReportFields {
    /// Decode a borsh encoded bundle. Trailing bytes are rejected.
    pub fn decode(bundle: &[u8]) -> Result<Self> {
        Ok(borsh::from_slice(bundle)?)
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(borsh::to_vec(self)?)
    }

    /// Split a report body, exactly as returned by IAS, into its fields.
    ///
    /// Members this crate cannot reproduce when rebuilding the signed message
    /// (nonce, platformInfoBlob, ...) are rejected.
    pub fn from_ias_json(body: &str) -> Result<Self> {
        let raw: IasReportBody = serde_json::from_str(body)
            .map_err(|e| VerificationError::field("report", e.to_string()))?;

        let quote_body = string_contents("isvEnclaveQuoteBody", raw.isv_enclave_quote_body)?;
        let quote_body = Base64::decode_vec(quote_body)
            .map_err(|e| VerificationError::field("isvEnclaveQuoteBody", e.to_string()))?;

        Ok(Self {
            id: string_contents("id", raw.id)?.into(),
            timestamp: string_contents("timestamp", raw.timestamp)?.into(),
            version: raw.version.get().into(),
            epid_pseudonym: optional_string_contents("epidPseudonym", raw.epid_pseudonym)?,
            advisory_url: optional_string_contents("advisoryURL", raw.advisory_url)?,
            advisory_ids: raw
                .advisory_ids
                .map(|ids| ids.get().as_bytes().to_vec())
                .unwrap_or_default(),
            isv_enclave_quote_status: string_contents(
                "isvEnclaveQuoteStatus",
                raw.isv_enclave_quote_status,
            )?
            .into(),
            isv_enclave_quote_body: quote_body,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct IasReportBody<'a> {
    #[serde(borrow)]
    id: &'a RawValue,
    #[serde(borrow)]
    timestamp: &'a RawValue,
    #[serde(borrow)]
    version: &'a RawValue,
    #[serde(borrow, default)]
    epid_pseudonym: Option<&'a RawValue>,
    #[serde(borrow, default, rename = "advisoryURL")]
    advisory_url: Option<&'a RawValue>,
    #[serde(borrow, default, rename = "advisoryIDs")]
    advisory_ids: Option<&'a RawValue>,
    #[serde(borrow)]
    isv_enclave_quote_status: &'a RawValue,
    #[serde(borrow)]
    isv_enclave_quote_body: &'a RawValue,
}

fn string_contents<'a>(field: &'static str, value: &'a RawValue) -> Result<&'a str> {
    value
        .get()
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or_else(|| VerificationError::field(field, "expected a json string"))
}

fn optional_string_contents(field: &'static str, value: Option<&RawValue>) -> Result<Vec<u8>> {
    value
        .map(|v| string_contents(field, v).map(|s| s.as_bytes().to_vec()))
        .transpose()
        .map(Option::unwrap_or_default)
}

/// The advisory id list, kept both as signed text and parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisoryIds {
    pub raw: String,
    pub ids: Vec<String>,
}

/// A validated report. Produced from [`ReportFields`] in one step; every text
/// field is known to be a well formed JSON string body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub id: String,
    pub timestamp: String,
    pub version: u32,
    pub epid_pseudonym: Option<String>,
    pub advisory_url: Option<String>,
    pub advisory_ids: Option<AdvisoryIds>,
    pub quote_status: String,
    pub quote_body: Vec<u8>,
}

impl TryFrom<ReportFields> for Report {
    type Error = VerificationError;

    fn try_from(fields: ReportFields) -> Result<Self> {
        let id = required_text("id", fields.id)?;
        let timestamp = required_text("timestamp", fields.timestamp)?;
        let version = parse_version(fields.version)?;
        let epid_pseudonym = optional_text("epidPseudonym", fields.epid_pseudonym)?;
        let advisory_url = optional_text("advisoryURL", fields.advisory_url)?;
        let advisory_ids = parse_advisory_ids(fields.advisory_ids)?;
        let quote_status = required_text("isvEnclaveQuoteStatus", fields.isv_enclave_quote_status)?;

        Ok(Report {
            id,
            timestamp,
            version,
            epid_pseudonym,
            advisory_url,
            advisory_ids,
            quote_status,
            quote_body: fields.isv_enclave_quote_body,
        })
    }
}

impl From<&Report> for ReportFields {
    fn from(report: &Report) -> Self {
        let optional = |v: &Option<String>| v.as_deref().unwrap_or_default().as_bytes().to_vec();
        ReportFields {
            id: report.id.as_bytes().to_vec(),
            timestamp: report.timestamp.as_bytes().to_vec(),
            version: report.version.to_string().into_bytes(),
            epid_pseudonym: optional(&report.epid_pseudonym),
            advisory_url: optional(&report.advisory_url),
            advisory_ids: report
                .advisory_ids
                .as_ref()
                .map(|ids| ids.raw.as_bytes().to_vec())
                .unwrap_or_default(),
            isv_enclave_quote_status: report.quote_status.as_bytes().to_vec(),
            isv_enclave_quote_body: report.quote_body.clone(),
        }
    }
}

fn text(field: &'static str, bytes: Vec<u8>) -> Result<String> {
    let text =
        String::from_utf8(bytes).map_err(|e| VerificationError::field(field, e.to_string()))?;

    // The value is embedded between quotes as is, so it has to be a complete
    // json string body: no bare quotes, control characters or dangling escapes.
    serde_json::from_str::<String>(&format!("\"{text}\""))
        .map_err(|e| VerificationError::field(field, format!("not a json string body: {e}")))?;

    Ok(text)
}

fn required_text(field: &'static str, bytes: Vec<u8>) -> Result<String> {
    if bytes.is_empty() {
        return Err(VerificationError::field(field, "missing"));
    }
    text(field, bytes)
}

fn optional_text(field: &'static str, bytes: Vec<u8>) -> Result<Option<String>> {
    if bytes.is_empty() {
        return Ok(None);
    }
    text(field, bytes).map(Some)
}

fn parse_version(bytes: Vec<u8>) -> Result<u32> {
    let version = std::str::from_utf8(&bytes)
        .map_err(|e| VerificationError::field("version", e.to_string()))?;
    let parsed: u32 = version
        .parse()
        .map_err(|_| VerificationError::field("version", format!("not an integer: {version:?}")))?;

    // Only the canonical spelling reproduces the signed bytes.
    if parsed.to_string() != version {
        return Err(VerificationError::field(
            "version",
            format!("non canonical integer: {version:?}"),
        ));
    }
    Ok(parsed)
}

fn parse_advisory_ids(bytes: Vec<u8>) -> Result<Option<AdvisoryIds>> {
    if bytes.is_empty() {
        return Ok(None);
    }
    let raw = String::from_utf8(bytes)
        .map_err(|e| VerificationError::field("advisoryIDs", e.to_string()))?;
    let ids: Vec<String> = serde_json::from_str(&raw).map_err(|e| {
        VerificationError::field("advisoryIDs", format!("not a json string array: {e}"))
    })?;
    Ok(Some(AdvisoryIds { raw, ids }))
}
