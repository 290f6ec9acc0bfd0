//! Checked little-endian scalar reads.
//!
//! The wire format is always little-endian, independent of the host.

use fragmat_error::{DecodeErrorKind, FragError, Result};

#[inline]
fn bytes_at<const N: usize>(buf: &[u8], pos: usize) -> Result<[u8; N]> {
    let slice = pos
        .checked_add(N)
        .and_then(|end| buf.get(pos..end))
        .ok_or_else(|| {
            FragError::decode_at(
                format!(
                    "need {N} bytes at 0x{pos:X} but buffer holds {} bytes",
                    buf.len()
                ),
                DecodeErrorKind::Truncated,
                pos,
            )
        })?;
    let mut arr = [0u8; N];
    arr.copy_from_slice(slice);
    Ok(arr)
}

#[inline]
pub fn read_u8(buf: &[u8], pos: usize) -> Result<u8> {
    Ok(bytes_at::<1>(buf, pos)?[0])
}

#[inline]
pub fn read_u16(buf: &[u8], pos: usize) -> Result<u16> {
    bytes_at(buf, pos).map(u16::from_le_bytes)
}

#[inline]
pub fn read_u32(buf: &[u8], pos: usize) -> Result<u32> {
    bytes_at(buf, pos).map(u32::from_le_bytes)
}

#[inline]
pub fn read_i32(buf: &[u8], pos: usize) -> Result<i32> {
    bytes_at(buf, pos).map(i32::from_le_bytes)
}
