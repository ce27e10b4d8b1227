//! Kernel architecture signature detection.
//!
//! Modern Linux kernel images carry a 4-byte magic at a fixed offset of
//! the image header identifying the target architecture. Very old
//! kernels predate the magic and are not supported.

use std::fmt;

/// Offset of the architecture magic within a kernel image.
pub const MAGIC_OFFSET: usize = 56;

const ARM64_MAGIC: [u8; 4] = *b"ARM\x64";
const RISCV_MAGIC: [u8; 4] = *b"RSC\x05";

/// Target architecture of a kernel image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Architecture {
    /// 64-bit ARM (`"ARM\x64"` magic).
    Arm64,
    /// RISC-V (`"RSC\x05"` magic).
    RiscV,
    /// No recognized signature. This is a closed set; images without a
    /// known magic are unsupported rather than assumed raw.
    Unknown,
}

impl Architecture {
    /// Identify the architecture of `image` from the magic at
    /// [`MAGIC_OFFSET`].
    pub fn identify(image: &[u8]) -> Self {
        if image.len() <= MAGIC_OFFSET + 4 {
            return Self::Unknown;
        }

        let magic = &image[MAGIC_OFFSET..MAGIC_OFFSET + 4];
        if magic == ARM64_MAGIC {
            Self::Arm64
        } else if magic == RISCV_MAGIC {
            Self::RiscV
        } else {
            Self::Unknown
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arm64 => write!(f, "ARM64"),
            Self::RiscV => write!(f, "RISC-V"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_with_magic(magic: &[u8; 4]) -> Vec<u8> {
        let mut image = vec![0u8; 128];
        image[MAGIC_OFFSET..MAGIC_OFFSET + 4].copy_from_slice(magic);
        image
    }

    #[test]
    fn test_arm64_magic() {
        let image = image_with_magic(b"ARM\x64");
        assert_eq!(Architecture::identify(&image), Architecture::Arm64);
    }

    #[test]
    fn test_riscv_magic() {
        let image = image_with_magic(b"RSC\x05");
        assert_eq!(Architecture::identify(&image), Architecture::RiscV);
    }

    #[test]
    fn test_no_magic() {
        let image = image_with_magic(b"X86\x00");
        assert_eq!(Architecture::identify(&image), Architecture::Unknown);
    }

    #[test]
    fn test_image_too_short() {
        // Exactly offset + 4 bytes is still too short (strict bound).
        let image = vec![0u8; MAGIC_OFFSET + 4];
        assert_eq!(Architecture::identify(&image), Architecture::Unknown);
    }

    #[test]
    fn test_display() {
        assert_eq!(Architecture::Arm64.to_string(), "ARM64");
        assert_eq!(Architecture::RiscV.to_string(), "RISC-V");
    }
}
