use base64ct::{Base64, Encoding};

use crate::types::report::Report;

/// Rebuild the report body exactly as IAS serialized and signed it.
///
/// Members appear in IAS order, without whitespace; `epidPseudonym`,
/// `advisoryURL` and `advisoryIDs` only when present. String values are
/// already escaped and are copied verbatim, the quote body is re-encoded
/// to base64.
pub fn build_report_message(report: &Report) -> Vec<u8> {
    let quote_body = Base64::encode_string(&report.quote_body);

    let mut json = String::with_capacity(256 + quote_body.len());
    json.push_str(r#"{"id":""#);
    json.push_str(&report.id);
    json.push_str(r#"","timestamp":""#);
    json.push_str(&report.timestamp);
    json.push_str(r#"","version":"#);
    json.push_str(&report.version.to_string());

    if let Some(epid_pseudonym) = &report.epid_pseudonym {
        json.push_str(r#","epidPseudonym":""#);
        json.push_str(epid_pseudonym);
        json.push('"');
    }
    if let Some(advisory_url) = &report.advisory_url {
        json.push_str(r#","advisoryURL":""#);
        json.push_str(advisory_url);
        json.push('"');
    }
    if let Some(advisory_ids) = &report.advisory_ids {
        json.push_str(r#","advisoryIDs":"#);
        json.push_str(&advisory_ids.raw);
    }

    json.push_str(r#","isvEnclaveQuoteStatus":""#);
    json.push_str(&report.quote_status);
    json.push_str(r#"","isvEnclaveQuoteBody":""#);
    json.push_str(&quote_body);
    json.push_str(r#""}"#);

    json.into_bytes()
}
