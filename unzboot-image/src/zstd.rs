//! Bounded Zstandard frame decompression.
//!
//! Unlike gzip, no framing work is owned here: the zstd library parses
//! the complete frame itself. This module only pins down the bounded
//! single-buffer call shape and the error mapping.

use crate::error::{Result, ZbootError};

/// Decompress one Zstandard frame into a fresh buffer of at most
/// `limit` bytes.
///
/// Any decoder failure, including output exceeding `limit`, surfaces as
/// [`ZbootError::ZstdFailed`].
pub fn decompress_frame(src: &[u8], limit: usize) -> Result<Vec<u8>> {
    zstd::bulk::decompress(src, limit).map_err(|e| ZbootError::zstd_failed(e.to_string()))
}
