//! EFI zboot container unpacking.
//!
//! Bootable Linux kernel images may be packaged as EFI zboot images,
//! which are self-decompressing executables when loaded via EFI. The
//! compressed payload can also be extracted from the image and
//! decompressed by a non-EFI loader, which is what this module does:
//! detect the container, bounds-check the payload window, and route the
//! payload to the decompressor named by the header.

mod header;

pub use header::{LINUX_EFI_MAGIC, MSDOS_MAGIC, ZIMG_MAGIC, ZbootHeader};

use crate::error::{Result, ZbootError};
use crate::{gzip, zstd};

/// Conservative ceiling for a decompressed kernel image, 256 MiB.
///
/// The zboot header carries no uncompressed-size field, so the bound is
/// policy, not a parsed value.
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 256 << 20;

/// Outcome of a container unpack attempt.
#[derive(Debug)]
pub enum Unpacked {
    /// The input is not a zboot container; the caller keeps the
    /// original bytes as the image.
    Bare,
    /// The payload was decompressed into a fresh buffer.
    Replaced(Vec<u8>),
}

/// Unpack a zboot container with the default size ceiling.
pub fn unpack(data: &[u8]) -> Result<Unpacked> {
    unpack_with_limit(data, DEFAULT_MAX_IMAGE_BYTES)
}

/// Unpack a zboot container, bounding the decompressed image at
/// `limit` bytes.
///
/// An input too small to hold a header, or whose magic fields mismatch,
/// is not a container and comes back as [`Unpacked::Bare`]. A matching
/// header with an inconsistent payload window is
/// [`ZbootError::CorruptContainer`]; decompression failures propagate
/// from the decompressor for the named compression type.
pub fn unpack_with_limit(data: &[u8], limit: usize) -> Result<Unpacked> {
    let Some(header) = ZbootHeader::detect(data) else {
        return Ok(Unpacked::Bare);
    };

    let window = header.payload_range(data.len())?;
    let payload = &data[window];

    let tag = header.compression_tag();
    let image = decompress_payload(&tag, payload, limit)?;
    Ok(Unpacked::Replaced(image))
}

/// Route a payload to the decompressor named by the header tag.
fn decompress_payload(tag: &str, src: &[u8], limit: usize) -> Result<Vec<u8>> {
    match tag {
        "gzip" => gzip::gunzip(src, limit),
        "zstd" | "zstd22" => zstd::decompress_frame(src, limit),
        other => Err(ZbootError::unsupported_compression(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a zboot container around `payload` with the given
    /// compression tag, payload placed directly after the header.
    fn build_container(tag: &str, payload: &[u8]) -> Vec<u8> {
        let mut image = vec![0u8; ZbootHeader::SIZE];
        image[0..2].copy_from_slice(&MSDOS_MAGIC);
        image[4..8].copy_from_slice(&ZIMG_MAGIC);
        image[8..12].copy_from_slice(&(ZbootHeader::SIZE as u32).to_le_bytes());
        image[12..16].copy_from_slice(&(payload.len() as u32).to_le_bytes());
        image[24..24 + tag.len()].copy_from_slice(tag.as_bytes());
        image[56..60].copy_from_slice(&LINUX_EFI_MAGIC);
        image.extend_from_slice(payload);
        image
    }

    fn gzip_member(content: &[u8]) -> Vec<u8> {
        use miniz_oxide::deflate::compress_to_vec;

        let mut member = vec![0x1f, 0x8b, 0x08, 0x00, 0, 0, 0, 0, 0, 3];
        member.extend_from_slice(&compress_to_vec(content, 6));
        member.extend_from_slice(&[0u8; 8]);
        member
    }

    #[test]
    fn test_bare_image_passes_through() {
        let data = vec![0x7Fu8; 200];
        assert!(matches!(unpack(&data).unwrap(), Unpacked::Bare));
    }

    #[test]
    fn test_tiny_input_passes_through() {
        assert!(matches!(unpack(b"MZ").unwrap(), Unpacked::Bare));
    }

    #[test]
    fn test_gzip_container_unpacks() {
        let content = b"decompressed kernel bytes".repeat(10);
        let container = build_container("gzip", &gzip_member(&content));

        match unpack(&container).unwrap() {
            Unpacked::Replaced(image) => assert_eq!(image, content),
            Unpacked::Bare => panic!("container not recognized"),
        }
    }

    #[test]
    fn test_zstd_container_unpacks() {
        let content = b"zstd framed kernel".repeat(32);
        let payload = ::zstd::bulk::compress(&content, 3).unwrap();
        let container = build_container("zstd", &payload);

        match unpack(&container).unwrap() {
            Unpacked::Replaced(image) => assert_eq!(image, content),
            Unpacked::Bare => panic!("container not recognized"),
        }
    }

    #[test]
    fn test_zstd22_tag_accepted() {
        let content = vec![0x11u8; 512];
        let payload = ::zstd::bulk::compress(&content, 19).unwrap();
        let container = build_container("zstd22", &payload);

        assert!(matches!(
            unpack(&container).unwrap(),
            Unpacked::Replaced(_)
        ));
    }

    #[test]
    fn test_unknown_tag_rejected_even_with_valid_payload() {
        let container = build_container("lzma", &gzip_member(b"plausible"));
        let err = unpack(&container).unwrap_err();
        match err {
            ZbootError::UnsupportedCompression { tag } => assert_eq!(tag, "lzma"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_corrupt_window_rejected() {
        let mut container = build_container("gzip", &gzip_member(b"payload"));
        // Claim one byte more than the image holds.
        let bad_size = (container.len() - ZbootHeader::SIZE + 1) as u32;
        container[12..16].copy_from_slice(&bad_size.to_le_bytes());

        let err = unpack(&container).unwrap_err();
        assert!(matches!(err, ZbootError::CorruptContainer { .. }));
    }

    #[test]
    fn test_offset_near_u32_max_rejected() {
        let mut container = build_container("gzip", &gzip_member(b"payload"));
        container[8..12].copy_from_slice(&(u32::MAX - 7).to_le_bytes());
        container[12..16].copy_from_slice(&16u32.to_le_bytes());

        let err = unpack(&container).unwrap_err();
        assert!(matches!(err, ZbootError::CorruptContainer { .. }));
    }

    #[test]
    fn test_garbage_gzip_payload_fails() {
        let container = build_container("gzip", &[0x01, 0x02, 0x03, 0x04]);
        let err = unpack(&container).unwrap_err();
        assert!(matches!(err, ZbootError::GzipBadHeader { .. }));
    }

    #[test]
    fn test_limit_enforced() {
        let content = vec![0xABu8; 1 << 16];
        let container = build_container("gzip", &gzip_member(&content));

        let err = unpack_with_limit(&container, 1024).unwrap_err();
        assert!(matches!(err, ZbootError::InflateFailed));
    }
}
