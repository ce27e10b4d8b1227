//! # unzboot-image
//!
//! Extraction of kernel images from EFI zboot self-decompressing
//! containers.
//!
//! Bootable Linux kernel images for ARM64 and RISC-V may be shipped as
//! EFI zboot images: a PE/COFF executable whose payload is the real
//! kernel, compressed with gzip or Zstandard. This crate detects the
//! container, decompresses the payload, and verifies the result carries
//! a recognized kernel architecture signature.
//!
//! - [`zboot`]: container header parsing and payload decompression
//! - [`gzip`]: gzip member framing over raw DEFLATE (RFC 1952)
//! - [`zstd`]: bounded Zstandard frame decompression
//! - [`arch`]: kernel architecture signature detection
//! - [`extract()`]: the end-to-end pipeline over in-memory bytes
//! - [`error`]: error types
//!
//! ## Example
//!
//! ```rust,no_run
//! use unzboot_image::extract;
//!
//! let bytes = std::fs::read("vmlinuz.efi").unwrap();
//! let image = extract(bytes).unwrap();
//! println!("found {} kernel, {} bytes", image.arch, image.data.len());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod arch;
pub mod error;
mod extract;
pub mod gzip;
pub mod zboot;
pub mod zstd;

// Re-exports
pub use arch::Architecture;
pub use error::{Result, ZbootError};
pub use extract::{ExtractedImage, extract, extract_with_limit};
pub use zboot::{DEFAULT_MAX_IMAGE_BYTES, Unpacked, ZbootHeader};
