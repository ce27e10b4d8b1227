//! Error types for zboot image extraction.
//!
//! Every failure in the pipeline maps to one variant here. Note that an
//! input which simply is not a zboot container is *not* an error: that is
//! the [`crate::zboot::Unpacked::Bare`] outcome, and the image is passed
//! through unchanged.

use std::io;
use thiserror::Error;

/// The main error type for zboot extraction operations.
#[derive(Debug, Error)]
pub enum ZbootError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The header magics matched but the payload window is inconsistent
    /// with the input buffer.
    #[error("Corrupt zboot container: {message}")]
    CorruptContainer {
        /// Description of the inconsistency.
        message: String,
    },

    /// The container names a compression type the extractor does not handle.
    #[error("Unsupported zboot compression type: {tag:?}")]
    UnsupportedCompression {
        /// The compression type tag, NUL-trimmed, as printable text.
        tag: String,
    },

    /// The gzip member header is malformed.
    #[error("Bad gzip header: {message}")]
    GzipBadHeader {
        /// Description of the header error.
        message: String,
    },

    /// The gzip member header runs past the end of the payload.
    #[error("Gzip payload truncated inside the member header")]
    GzipTruncated,

    /// Raw DEFLATE inflation failed. Covers corrupt streams, incomplete
    /// streams, and output exceeding the configured bound alike.
    #[error("DEFLATE decompression failed")]
    InflateFailed,

    /// Zstandard frame decompression failed.
    #[error("Zstandard decompression failed: {message}")]
    ZstdFailed {
        /// Description reported by the zstd decoder.
        message: String,
    },

    /// The decompressed buffer carries no recognized kernel signature.
    #[error("No ARM64 or RISC-V kernel signature found in the image")]
    UnrecognizedArchitecture,
}

/// Result type alias for zboot extraction operations.
pub type Result<T> = std::result::Result<T, ZbootError>;

impl ZbootError {
    /// Create a corrupt container error.
    pub fn corrupt_container(message: impl Into<String>) -> Self {
        Self::CorruptContainer {
            message: message.into(),
        }
    }

    /// Create an unsupported compression error.
    pub fn unsupported_compression(tag: impl Into<String>) -> Self {
        Self::UnsupportedCompression { tag: tag.into() }
    }

    /// Create a bad gzip header error.
    pub fn gzip_bad_header(message: impl Into<String>) -> Self {
        Self::GzipBadHeader {
            message: message.into(),
        }
    }

    /// Create a zstd failure from the decoder's report.
    pub fn zstd_failed(message: impl Into<String>) -> Self {
        Self::ZstdFailed {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ZbootError::unsupported_compression("lzma");
        assert!(err.to_string().contains("lzma"));

        let err = ZbootError::corrupt_container("payload window out of bounds");
        assert!(err.to_string().contains("payload window"));

        let err = ZbootError::gzip_bad_header("reserved flag bits set");
        assert!(err.to_string().contains("reserved"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: ZbootError = io_err.into();
        assert!(matches!(err, ZbootError::Io(_)));
    }
}
