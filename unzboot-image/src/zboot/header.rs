//! EFI zboot header parsing.
//!
//! The de facto specification for this layout is the Linux kernel's
//! `drivers/firmware/efi/libstub/zboot-header.S`. All multi-byte fields
//! are little-endian, and the whole header sits at offset 0 of the image.

use std::borrow::Cow;
use std::ops::Range;

use crate::error::{Result, ZbootError};

/// The PE/COFF MS-DOS stub magic number.
pub const MSDOS_MAGIC: [u8; 2] = *b"MZ";

/// Tag identifying a Linux EFI zboot image.
pub const ZIMG_MAGIC: [u8; 4] = *b"zimg";

/// The Linux header magic for an EFI PE/COFF image targeting an
/// unspecified architecture.
pub const LINUX_EFI_MAGIC: [u8; 4] = [0xCD, 0x23, 0x82, 0x81];

/// EFI zboot image header.
///
/// A decoded view of the fixed-layout record at the start of a zboot
/// image. Produced by [`ZbootHeader::detect`] only when all three magic
/// fields match; offsets and sizes are still unvalidated at that point
/// and must go through [`ZbootHeader::payload_range`] before any access.
#[derive(Debug, Clone)]
pub struct ZbootHeader {
    /// Offset of the compressed payload within the image.
    pub payload_offset: u32,
    /// Size of the compressed payload in bytes.
    pub payload_size: u32,
    /// Compression type tag, NUL-terminated ASCII.
    pub compression_type: [u8; 32],
    /// Offset of the PE header within the image.
    pub pe_header_offset: u32,
}

impl ZbootHeader {
    /// Total size of the on-disk header in bytes.
    pub const SIZE: usize = 64;

    /// Try to decode a zboot header from the start of `data`.
    ///
    /// Returns `None` when `data` is too small to hold a header or any
    /// of the magic fields mismatch. Neither case is an error: the
    /// buffer is simply not a zboot container.
    pub fn detect(data: &[u8]) -> Option<Self> {
        if data.len() < Self::SIZE {
            return None;
        }

        if data[0..2] != MSDOS_MAGIC || data[4..8] != ZIMG_MAGIC || data[56..60] != LINUX_EFI_MAGIC
        {
            return None;
        }

        let payload_offset = u32::from_le_bytes([data[8], data[9], data[10], data[11]]);
        let payload_size = u32::from_le_bytes([data[12], data[13], data[14], data[15]]);
        let mut compression_type = [0u8; 32];
        compression_type.copy_from_slice(&data[24..56]);
        let pe_header_offset = u32::from_le_bytes([data[60], data[61], data[62], data[63]]);

        Some(Self {
            payload_offset,
            payload_size,
            compression_type,
            pe_header_offset,
        })
    }

    /// The compression type tag as printable text, trimmed at the first
    /// NUL byte.
    pub fn compression_tag(&self) -> Cow<'_, str> {
        let end = self
            .compression_type
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.compression_type.len());
        String::from_utf8_lossy(&self.compression_type[..end])
    }

    /// Validate the payload window against the image length and return
    /// it as a range.
    ///
    /// The check is overflow-safe: offset and size are combined with
    /// checked arithmetic, so adversarial values near `u32::MAX` fail
    /// cleanly instead of wrapping.
    pub fn payload_range(&self, image_len: usize) -> Result<Range<usize>> {
        let offset = self.payload_offset as usize;
        let size = self.payload_size as usize;

        let end = offset.checked_add(size).ok_or_else(|| {
            ZbootError::corrupt_container(format!(
                "payload window {offset}+{size} overflows"
            ))
        })?;
        if end > image_len {
            return Err(ZbootError::corrupt_container(format!(
                "payload window {offset}+{size} exceeds image size {image_len}"
            )));
        }

        Ok(offset..end)
    }
}
