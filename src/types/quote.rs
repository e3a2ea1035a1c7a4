use zerocopy::byteorder::little_endian::{U16, U32};
use zerocopy::{AsBytes, FromBytes, FromZeroes, Unaligned};

/// The `isvEnclaveQuoteBody` IAS returns: an EPID quote with its signature stripped.
///
/// [48 - header] [384 - isv enclave report]
#[derive(Debug, Clone, Copy, FromBytes, FromZeroes, AsBytes, Unaligned)]
#[repr(C)]
pub struct EpidQuote {
    pub header: EpidQuoteHeader,
    pub report_body: EnclaveReportBody,
}

#[derive(Debug, Clone, Copy, FromBytes, FromZeroes, AsBytes, Unaligned)]
#[repr(C)]
pub struct EpidQuoteHeader {
    /// Version of the quote data structure.
    /// [2 bytes]
    pub version: U16,

    /// 0 (unlinkable) or 1 (linkable).
    /// [2 bytes]
    pub sign_type: U16,

    /// [4 bytes]
    pub epid_group_id: [u8; 4],

    /// Security Version of the Quoting Enclave
    /// [2 bytes]
    pub qe_svn: U16,

    /// Security Version of the PCE
    /// [2 bytes]
    pub pce_svn: U16,

    /// Extended EPID group id
    /// [4 bytes]
    pub xeid: U32,

    /// Basename used for linkable quotes.
    /// [32 bytes]
    pub basename: [u8; 32],
}

/// SGX REPORT body of the attested ISV enclave.
#[derive(Debug, Clone, Copy, FromBytes, FromZeroes, AsBytes, Unaligned)]
#[repr(C)]
pub struct EnclaveReportBody {
    /// [16 bytes]
    pub cpu_svn: [u8; 16],

    /// [4 bytes]
    pub misc_select: U32,

    /// [28 bytes]
    pub reserved_1: [u8; 28],

    /// [16 bytes]
    pub attributes: [u8; 16],

    /// SHA256 hash of the enclave contents and layout.
    /// [32 bytes]
    pub mr_enclave: [u8; 32],

    /// [32 bytes]
    pub reserved_2: [u8; 32],

    /// SHA256 hash of the enclave signer's modulus.
    /// [32 bytes]
    pub mr_signer: [u8; 32],

    /// [96 bytes]
    pub reserved_3: [u8; 96],

    /// [2 bytes]
    pub isv_prod_id: U16,

    /// [2 bytes]
    pub isv_svn: U16,

    /// [60 bytes]
    pub reserved_4: [u8; 60],

    /// Data the enclave bound into the report.
    /// [64 bytes]
    pub report_data: [u8; 64],
}
