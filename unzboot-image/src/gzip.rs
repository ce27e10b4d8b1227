//! Gzip member framing (RFC 1952).
//!
//! zboot gzip payloads are complete gzip members, but the raw DEFLATE
//! stream inside is what actually gets inflated. This module owns only the
//! member *framing*: it skips the variable-length member header and hands
//! the remainder to the raw-inflate capability. The trailing CRC32/ISIZE
//! bytes after the DEFLATE stream are left unread, as the stream is
//! self-terminating.

use miniz_oxide::inflate::decompress_to_vec_with_limit;

use crate::error::{Result, ZbootError};

/// Gzip compression method: DEFLATE.
pub const CM_DEFLATE: u8 = 8;

/// Fixed length of the gzip member header before any optional fields.
const BASE_HEADER_LEN: usize = 10;

/// Gzip member header flags.
pub mod flags {
    /// Header CRC16 present.
    pub const FHCRC: u8 = 0x02;
    /// Extra field present.
    pub const FEXTRA: u8 = 0x04;
    /// Original filename present.
    pub const FNAME: u8 = 0x08;
    /// Comment present.
    pub const FCOMMENT: u8 = 0x10;
    /// Reserved bits, must be zero.
    pub const RESERVED: u8 = 0xE0;
}

/// Compute the offset at which the raw DEFLATE stream begins inside a
/// gzip member.
///
/// Validates the compression method and flag byte, then skips the
/// optional extra field, original name, comment, and header CRC per
/// RFC 1952. Returns [`ZbootError::GzipTruncated`] if the header runs
/// past the end of `src`.
pub fn member_data_offset(src: &[u8]) -> Result<usize> {
    if src.len() < 4 {
        return Err(ZbootError::GzipTruncated);
    }

    let method = src[2];
    let hdr_flags = src[3];
    if method != CM_DEFLATE {
        return Err(ZbootError::gzip_bad_header(format!(
            "compression method {method}, expected DEFLATE ({CM_DEFLATE})"
        )));
    }
    if hdr_flags & flags::RESERVED != 0 {
        return Err(ZbootError::gzip_bad_header(format!(
            "reserved flag bits set in {hdr_flags:#04x}"
        )));
    }

    let mut offset = BASE_HEADER_LEN;

    if hdr_flags & flags::FEXTRA != 0 {
        if src.len() < 12 {
            return Err(ZbootError::GzipTruncated);
        }
        let xlen = u16::from_le_bytes([src[10], src[11]]) as usize;
        offset = 12 + xlen;
    }

    if hdr_flags & flags::FNAME != 0 {
        offset = skip_nul_terminated(src, offset);
    }

    if hdr_flags & flags::FCOMMENT != 0 {
        offset = skip_nul_terminated(src, offset);
    }

    if hdr_flags & flags::FHCRC != 0 {
        offset += 2;
    }

    if offset >= src.len() {
        return Err(ZbootError::GzipTruncated);
    }

    Ok(offset)
}

/// Advance past a NUL-terminated field, stopping at the end of input.
fn skip_nul_terminated(src: &[u8], mut offset: usize) -> usize {
    while offset < src.len() {
        let byte = src[offset];
        offset += 1;
        if byte == 0 {
            break;
        }
    }
    offset
}

/// Decompress a gzip member into a fresh buffer of at most `limit` bytes.
///
/// All inflate failures surface as [`ZbootError::InflateFailed`]: a
/// corrupt stream, an incomplete stream, and output exceeding `limit`
/// are indistinguishable at this layer.
pub fn gunzip(src: &[u8], limit: usize) -> Result<Vec<u8>> {
    let offset = member_data_offset(src)?;
    decompress_to_vec_with_limit(&src[offset..], limit).map_err(|_| ZbootError::InflateFailed)
}
