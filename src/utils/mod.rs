pub mod cert;
pub mod crypto;
pub mod report;

/// Returns the `len` bytes of `bytes` starting at `offset`.
///
/// Returns `None` if the region does not lie entirely inside `bytes`.
pub fn read_slice(bytes: &[u8], offset: usize, len: usize) -> Option<&[u8]> {
    let end = offset.checked_add(len)?;
    bytes.get(offset..end)
}

/// Copies the `N` bytes starting at `offset` into an owned `[u8; N]`.
///
/// Returns `None` if the region does not lie entirely inside `bytes`.
pub fn read_array<const N: usize>(bytes: &[u8], offset: usize) -> Option<[u8; N]> {
    let mut res = [0u8; N];
    res.copy_from_slice(read_slice(bytes, offset, N)?);
    Some(res)
}
