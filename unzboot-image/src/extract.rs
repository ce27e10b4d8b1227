//! The extraction pipeline over in-memory bytes.
//!
//! Loading input bytes and writing the result back out belong to the
//! caller; this module owns the middle: unpack the container if there is
//! one, then verify the result carries a recognized kernel signature.

use crate::arch::Architecture;
use crate::error::{Result, ZbootError};
use crate::zboot::{self, Unpacked};

/// A verified kernel image ready to be written out.
#[derive(Debug)]
pub struct ExtractedImage {
    /// The kernel image bytes, decompressed if the input was a container.
    pub data: Vec<u8>,
    /// The architecture identified from the image signature.
    pub arch: Architecture,
}

/// Extract and verify a kernel image with the default size ceiling.
pub fn extract(data: Vec<u8>) -> Result<ExtractedImage> {
    extract_with_limit(data, zboot::DEFAULT_MAX_IMAGE_BYTES)
}

/// Extract and verify a kernel image, bounding decompression at
/// `limit` bytes.
///
/// Consumes the input buffer; when the input is a zboot container the
/// original bytes are dropped and replaced by the decompressed payload.
/// An image without a recognized architecture signature is
/// [`ZbootError::UnrecognizedArchitecture`].
pub fn extract_with_limit(data: Vec<u8>, limit: usize) -> Result<ExtractedImage> {
    let image = match zboot::unpack_with_limit(&data, limit)? {
        Unpacked::Bare => data,
        Unpacked::Replaced(image) => image,
    };

    match Architecture::identify(&image) {
        Architecture::Unknown => Err(ZbootError::UnrecognizedArchitecture),
        arch => Ok(ExtractedImage { data: image, arch }),
    }
}
