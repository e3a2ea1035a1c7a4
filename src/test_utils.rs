//! Fixtures shared by the unit tests: RSA keys, signed messages, certificates and quotes.

use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Duration;

use base64ct::{Base64, Encoding};
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::pkcs8::EncodePublicKey;
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use x509_cert::certificate::{TbsCertificate, Version};
use x509_cert::der::asn1::BitString;
use x509_cert::der::oid::ObjectIdentifier;
use x509_cert::der::{Decode, Encode};
use x509_cert::name::Name;
use x509_cert::serial_number::SerialNumber;
use x509_cert::spki::{AlgorithmIdentifierOwned, SubjectPublicKeyInfoOwned};
use x509_cert::time::Validity;
use x509_cert::Certificate;
use zerocopy::{AsBytes, FromZeroes};

use crate::constants::SHA256_WITH_RSA_ENCRYPTION_OID;
use crate::types::quote::EpidQuote;
use crate::types::report::ReportFields;
use crate::utils::crypto::{sha256sum, SignerKey};

pub const MR_ENCLAVE: [u8; 32] = [0xe1; 32];
pub const MR_SIGNER: [u8; 32] = [0x5a; 32];
pub const PAYLOAD: [u8; 64] = *b"ias-rs enclave payload: 0123456789abcdef0123456789abcdef01234567";
pub const ISV_SVN: u16 = 3;

// Small keys keep generation fast in debug builds.
const KEY_BITS: usize = 1024;

fn generate(cell: &'static OnceLock<RsaPrivateKey>) -> &'static RsaPrivateKey {
    cell.get_or_init(|| RsaPrivateKey::new(&mut rand::thread_rng(), KEY_BITS).unwrap())
}

/// Plays the attestation report signing CA.
pub fn root_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    generate(&KEY)
}

/// Plays the attestation report signing key.
pub fn leaf_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    generate(&KEY)
}

/// Unrelated key.
pub fn other_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    generate(&KEY)
}

pub fn signer_key(key: &RsaPrivateKey) -> SignerKey {
    SignerKey::from(key.to_public_key())
}

pub fn sign(key: &RsaPrivateKey, message: &[u8]) -> Vec<u8> {
    key.sign(Pkcs1v15Sign::new::<Sha256>(), &sha256sum(message))
        .unwrap()
}

pub fn quote() -> EpidQuote {
    let mut quote = EpidQuote::new_zeroed();
    quote.header.version.set(2);
    quote.header.sign_type.set(1);
    quote.header.epid_group_id = [0x0b, 0x0c, 0x00, 0x00];
    quote.header.qe_svn.set(11);
    quote.header.pce_svn.set(10);
    quote.report_body.mr_enclave = MR_ENCLAVE;
    quote.report_body.mr_signer = MR_SIGNER;
    quote.report_body.isv_prod_id.set(1);
    quote.report_body.isv_svn.set(ISV_SVN);
    quote.report_body.report_data = PAYLOAD;
    quote
}

pub fn quote_body() -> Vec<u8> {
    quote().as_bytes().to_vec()
}

pub fn report_fields(status: &str, quote_body: Vec<u8>) -> ReportFields {
    ReportFields {
        id: b"219966280568893600543427580608194089763".to_vec(),
        timestamp: b"2023-06-09T17:49:04.520486".to_vec(),
        version: b"4".to_vec(),
        epid_pseudonym: b"EbrM6X6YCH3brjPXT23gVh/I2EG5sVfHYh+S54fb0rrAqVRTiRTOSfLsWSVTZc8wrazGG7oooGoMU7Gj5TEhsvsDIV4aYpvkSk/E3Tsb7CaGd+Iy1cEhLO4GPwdmwt/PXNQQ3htLdy3aNb7iQMrNbiFcdkVdV/tepdezMsSB8Go=".to_vec(),
        advisory_url: b"https://security-center.intel.com".to_vec(),
        advisory_ids: br#"["INTEL-SA-00334","INTEL-SA-00615"]"#.to_vec(),
        isv_enclave_quote_status: status.as_bytes().to_vec(),
        isv_enclave_quote_body: quote_body,
    }
}

/// DER certificate for `subject`'s public key, signed by `issuer`.
pub fn leaf_certificate(issuer: &RsaPrivateKey, subject: &RsaPrivateKey) -> Vec<u8> {
    let algorithm = AlgorithmIdentifierOwned {
        oid: ObjectIdentifier::new_unwrap(SHA256_WITH_RSA_ENCRYPTION_OID),
        parameters: None,
    };
    let spki = subject.to_public_key().to_public_key_der().unwrap();

    let tbs_certificate = TbsCertificate {
        version: Version::V3,
        serial_number: SerialNumber::new(&[0x09, 0x49, 0x80, 0x77]).unwrap(),
        signature: algorithm.clone(),
        issuer: Name::from_str("CN=Intel SGX Attestation Report Signing CA,O=Intel Corporation,C=US")
            .unwrap(),
        validity: Validity::from_now(Duration::from_secs(86_400)).unwrap(),
        subject: Name::from_str("CN=Intel SGX Attestation Report Signing,O=Intel Corporation,C=US")
            .unwrap(),
        subject_public_key_info: SubjectPublicKeyInfoOwned::from_der(spki.as_bytes()).unwrap(),
        issuer_unique_id: None,
        subject_unique_id: None,
        extensions: None,
    };

    let signature = sign(issuer, &tbs_certificate.to_der().unwrap());
    Certificate {
        tbs_certificate,
        signature_algorithm: algorithm,
        signature: BitString::from_bytes(&signature).unwrap(),
    }
    .to_der()
    .unwrap()
}

/// A report IAS returned for a production enclave, with its signature and the
/// `X-IASReport-Signing-Certificate` chain (leaf first, then the root CA).
pub const IAS_REPORT: &str = r#"{"id":"219966280568893600543427580608194089763","timestamp":"2023-01-20T19:47:28.465440","version":4,"epidPseudonym":"EbrM6X6YCH3brjPXT23gVh/I2EG5sVfHYh+S54fb0rrAqVRTiRTOSfLsWSVTZc8wrazGG7oooGoMU7Gj5TEhsvsDIV4aYpvkSk/E3Tsb7CaGd+Iy1cEhLO4GPwdmwt/PXNQQ3htLdy3aNb7iQMrNbiFcdkVdV/tepdezMsSB8Go=","advisoryURL":"https://security-center.intel.com","advisoryIDs":["INTEL-SA-00334","INTEL-SA-00615"],"isvEnclaveQuoteStatus":"SW_HARDENING_NEEDED","isvEnclaveQuoteBody":"AgABAIAMAAANAA0AAAAAAEJhbJjVPJcSY5RHybDnAD8AAAAAAAAAAAAAAAAAAAAAFBQLB/+ADgAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAABwAAAAAAAAAfAAAAAAAAAE2yt+DKX+yq83lz+hnlXoyXOtEe0PZj7lECfkmRha1yAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAACD1xnnferKFHD2uvYqTXdDA8iZ22kCD5xw7h38CMfOngAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAACOKnQegP7jJKCRW0CuwocB1b9Ilk3LxdQfcm8RgfwktN7LzgWkmU1t7GzZf3P8g2cAAAAAAAAAAAAAAAAAAAAA"}"#;

pub const IAS_REPORT_SIGNATURE: &str = "bCtv7P9lbBwuRNuHJfBMsmj6ylOlZGtboWJpKJuqXon/MU0I1j+AjNUR7eLrtcQ9gf3lc0kHGXe37JO7+PWTRIGUY3MWHsYXlzbuFO484xtvJqbMiluUgD2zKYY//0qVph+GKpgJSedPDVjxtk11KcVeEd0kRh21Jp/ltHy4S1xUPsXkDHSP6TgVMSJ361Wj/xg8cgML6+E2M4rAbgtVGXqjvHMNRNxrOa4jnWKi9mpb+9Wzgv8SyJ5Mqk7IGtyYD6KKiD9fGqVjZXr0HNdzVqzfN1LAUxTPpxniPDSgIKrnGE2i3W6fuc4CZYz9nDi2Pr9vNk8w857uewp+voIhxw==";

pub const IAS_SIGNING_CERTIFICATES: &str = "\
-----BEGIN CERTIFICATE-----\n\
MIIEoTCCAwmgAwIBAgIJANEHdl0yo7CWMA0GCSqGSIb3DQEBCwUAMH4xCzAJBgNV\n\
BAYTAlVTMQswCQYDVQQIDAJDQTEUMBIGA1UEBwwLU2FudGEgQ2xhcmExGjAYBgNV\n\
BAoMEUludGVsIENvcnBvcmF0aW9uMTAwLgYDVQQDDCdJbnRlbCBTR1ggQXR0ZXN0\n\
YXRpb24gUmVwb3J0IFNpZ25pbmcgQ0EwHhcNMTYxMTIyMDkzNjU4WhcNMjYxMTIw\n\
MDkzNjU4WjB7MQswCQYDVQQGEwJVUzELMAkGA1UECAwCQ0ExFDASBgNVBAcMC1Nh\n\
bnRhIENsYXJhMRowGAYDVQQKDBFJbnRlbCBDb3Jwb3JhdGlvbjEtMCsGA1UEAwwk\n\
SW50ZWwgU0dYIEF0dGVzdGF0aW9uIFJlcG9ydCBTaWduaW5nMIIBIjANBgkqhkiG\n\
9w0BAQEFAAOCAQ8AMIIBCgKCAQEAqXot4OZuphR8nudFrAFiaGxxkgma/Es/BA+t\n\
beCTUR106AL1ENcWA4FX3K+E9BBL0/7X5rj5nIgX/R/1ubhkKWw9gfqPG3KeAtId\n\
cv/uTO1yXv50vqaPvE1CRChvzdS/ZEBqQ5oVvLTPZ3VEicQjlytKgN9cLnxbwtuv\n\
LUK7eyRPfJW/ksddOzP8VBBniolYnRCD2jrMRZ8nBM2ZWYwnXnwYeOAHV+W9tOhA\n\
ImwRwKF/95yAsVwd21ryHMJBcGH70qLagZ7Ttyt++qO/6+KAXJuKwZqjRlEtSEz8\n\
gZQeFfVYgcwSfo96oSMAzVr7V0L6HSDLRnpb6xxmbPdqNol4tQIDAQABo4GkMIGh\n\
MB8GA1UdIwQYMBaAFHhDe3amfrzQr35CN+s1fDuHAVE8MA4GA1UdDwEB/wQEAwIG\n\
wDAMBgNVHRMBAf8EAjAAMGAGA1UdHwRZMFcwVaBToFGGT2h0dHA6Ly90cnVzdGVk\n\
c2VydmljZXMuaW50ZWwuY29tL2NvbnRlbnQvQ1JML1NHWC9BdHRlc3RhdGlvblJl\n\
cG9ydFNpZ25pbmdDQS5jcmwwDQYJKoZIhvcNAQELBQADggGBAGcIthtcK9IVRz4r\n\
Rq+ZKE+7k50/OxUsmW8aavOzKb0iCx07YQ9rzi5nU73tME2yGRLzhSViFs/LpFa9\n\
lpQL6JL1aQwmDR74TxYGBAIi5f4I5TJoCCEqRHz91kpG6Uvyn2tLmnIdJbPE4vYv\n\
WLrtXXfFBSSPD4Afn7+3/XUggAlc7oCTizOfbbtOFlYA4g5KcYgS1J2ZAeMQqbUd\n\
ZseZCcaZZZn65tdqee8UXZlDvx0+NdO0LR+5pFy+juM0wWbu59MvzcmTXbjsi7HY\n\
6zd53Yq5K244fwFHRQ8eOB0IWB+4PfM7FeAApZvlfqlKOlLcZL2uyVmzRkyR5yW7\n\
2uo9mehX44CiPJ2fse9Y6eQtcfEhMPkmHXI01sN+KwPbpA39+xOsStjhP9N1Y1a2\n\
tQAVo+yVgLgV2Hws73Fc0o3wC78qPEA+v2aRs/Be3ZFDgDyghc/1fgU+7C+P6kbq\n\
d4poyb6IW8KCJbxfMJvkordNOgOUUxndPHEi/tb/U7uLjLOgPA==\n\
-----END CERTIFICATE-----\n\
-----BEGIN CERTIFICATE-----\n\
MIIFSzCCA7OgAwIBAgIJANEHdl0yo7CUMA0GCSqGSIb3DQEBCwUAMH4xCzAJBgNV\n\
BAYTAlVTMQswCQYDVQQIDAJDQTEUMBIGA1UEBwwLU2FudGEgQ2xhcmExGjAYBgNV\n\
BAoMEUludGVsIENvcnBvcmF0aW9uMTAwLgYDVQQDDCdJbnRlbCBTR1ggQXR0ZXN0\n\
YXRpb24gUmVwb3J0IFNpZ25pbmcgQ0EwIBcNMTYxMTE0MTUzNzMxWhgPMjA0OTEy\n\
MzEyMzU5NTlaMH4xCzAJBgNVBAYTAlVTMQswCQYDVQQIDAJDQTEUMBIGA1UEBwwL\n\
U2FudGEgQ2xhcmExGjAYBgNVBAoMEUludGVsIENvcnBvcmF0aW9uMTAwLgYDVQQD\n\
DCdJbnRlbCBTR1ggQXR0ZXN0YXRpb24gUmVwb3J0IFNpZ25pbmcgQ0EwggGiMA0G\n\
CSqGSIb3DQEBAQUAA4IBjwAwggGKAoIBgQCfPGR+tXc8u1EtJzLA10Feu1Wg+p7e\n\
LmSRmeaCHbkQ1TF3Nwl3RmpqXkeGzNLd69QUnWovYyVSndEMyYc3sHecGgfinEeh\n\
rgBJSEdsSJ9FpaFdesjsxqzGRa20PYdnnfWcCTvFoulpbFR4VBuXnnVLVzkUvlXT\n\
L/TAnd8nIZk0zZkFJ7P5LtePvykkar7LcSQO85wtcQe0R1Raf/sQ6wYKaKmFgCGe\n\
NpEJUmg4ktal4qgIAxk+QHUxQE42sxViN5mqglB0QJdUot/o9a/V/mMeH8KvOAiQ\n\
byinkNndn+Bgk5sSV5DFgF0DffVqmVMblt5p3jPtImzBIH0QQrXJq39AT8cRwP5H\n\
afuVeLHcDsRp6hol4P+ZFIhu8mmbI1u0hH3W/0C2BuYXB5PC+5izFFh/nP0lc2Lf\n\
6rELO9LZdnOhpL1ExFOq9H/B8tPQ84T3Sgb4nAifDabNt/zu6MmCGo5U8lwEFtGM\n\
RoOaX4AS+909x00lYnmtwsDVWv9vBiJCXRsCAwEAAaOByTCBxjBgBgNVHR8EWTBX\n\
MFWgU6BRhk9odHRwOi8vdHJ1c3RlZHNlcnZpY2VzLmludGVsLmNvbS9jb250ZW50\n\
L0NSTC9TR1gvQXR0ZXN0YXRpb25SZXBvcnRTaWduaW5nQ0EuY3JsMB0GA1UdDgQW\n\
BBR4Q3t2pn680K9+QjfrNXw7hwFRPDAfBgNVHSMEGDAWgBR4Q3t2pn680K9+Qjfr\n\
NXw7hwFRPDAOBgNVHQ8BAf8EBAMCAQYwEgYDVR0TAQH/BAgwBgEB/wIBADANBgkq\n\
hkiG9w0BAQsFAAOCAYEAeF8tYMXICvQqeXYQITkV2oLJsp6J4JAqJabHWxYJHGir\n\
IEqucRiJSSx+HjIJEUVaj8E0QjEud6Y5lNmXlcjqRXaCPOqK0eGRz6hi+ripMtPZ\n\
sFNaBwLQVV905SDjAzDzNIDnrcnXyB4gcDFCvwDFKKgLRjOB/WAqgscDUoGq5ZVi\n\
zLUzTqiQPmULAQaB9c6Oti6snEFJiCQ67JLyW/E83/frzCmO5Ru6WjU4tmsmy8Ra\n\
Ud4APK0wZTGtfPXU7w+IBdG5Ez0kE1qzxGQaL4gINJ1zMyleDnbuS8UicjJijvqA\n\
152Sq049ESDz+1rRGc2NVEqh1KaGXmtXvqxXcTB+Ljy5Bw2ke0v8iGngFBPqCTVB\n\
3op5KBG3RjbF6RRSzwzuWfL7QErNC8WEy5yDVARzTA5+xmBc388v9Dm21HGfcC8O\n\
DD+gT9sSpssq0ascmvH49MOgjt1yoysLtdCtJW/9FZpoOypaHx0R+mJTLwPXVMrv\n\
DaVzWh5aiEx+idkSGMnX\n\
-----END CERTIFICATE-----\n";

pub const IAS_MR_ENCLAVE: &str = "4db2b7e0ca5fecaaf37973fa19e55e8c973ad11ed0f663ee51027e499185ad72";
pub const IAS_MR_SIGNER: &str = "83d719e77deaca1470f6baf62a4d774303c899db69020f9c70ee1dfc08c7ce9e";
/// A BLS public key followed by zero padding.
pub const IAS_REPORT_DATA: &str = "8e2a741e80fee324a0915b40aec28701d5bf48964dcbc5d41f726f1181fc24b4\
decbce05a4994d6dec6cd97f73fc836700000000000000000000000000000000";

pub fn ias_report_signature() -> Vec<u8> {
    Base64::decode_vec(IAS_REPORT_SIGNATURE).unwrap()
}

pub fn ias_certificates() -> Vec<Vec<u8>> {
    pem::parse_many(IAS_SIGNING_CERTIFICATES)
        .unwrap()
        .into_iter()
        .map(|block| block.into_contents())
        .collect()
}

/// Public key of the Intel SGX Attestation Report Signing CA.
pub fn ias_root_key() -> SignerKey {
    let root = Certificate::from_der(&ias_certificates()[1]).unwrap();
    let spki = root.tbs_certificate.subject_public_key_info.subject_public_key;
    SignerKey::from(RsaPublicKey::from_pkcs1_der(spki.raw_bytes()).unwrap())
}
