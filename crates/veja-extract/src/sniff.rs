//! Container format detection by magic-byte signature.

/// Container formats the pipeline can walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    /// Neither known signature matched; the buffer is left alone.
    Unsupported,
}

/// PNG file signature (8 bytes).
pub const PNG_SIGNATURE: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// JPEG SOI marker (2 bytes).
pub const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8];

/// Known signatures in match order. PNG is checked before JPEG.
const SIGNATURES: &[(ImageFormat, &[u8])] = &[
    (ImageFormat::Png, PNG_SIGNATURE),
    (ImageFormat::Jpeg, JPEG_SIGNATURE),
];

/// Classify a byte buffer by its leading magic bytes.
///
/// Pure function of the buffer's first bytes; first matching signature
/// wins. Buffers shorter than a signature simply do not match it, so empty
/// and truncated input classify as [`ImageFormat::Unsupported`] without any
/// out-of-bounds access.
pub fn classify(buffer: &[u8]) -> ImageFormat {
    for (format, signature) in SIGNATURES {
        if buffer.len() >= signature.len() && &buffer[..signature.len()] == *signature {
            return *format;
        }
    }
    ImageFormat::Unsupported
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_png() {
        let buffer = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00];
        assert_eq!(classify(&buffer), ImageFormat::Png);
    }

    #[test]
    fn test_classify_jpeg() {
        let buffer = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        assert_eq!(classify(&buffer), ImageFormat::Jpeg);
    }

    #[test]
    fn test_classify_unknown_bytes() {
        assert_eq!(classify(b"GIF89a"), ImageFormat::Unsupported);
        assert_eq!(classify(&[0xDE, 0xAD, 0xBE, 0xEF]), ImageFormat::Unsupported);
    }

    #[test]
    fn test_classify_short_buffers_never_panic() {
        // Every prefix shorter than the PNG signature, including empty
        for len in 0..8 {
            let buffer = vec![0x89; len];
            let _ = classify(&buffer);
        }
        assert_eq!(classify(&[]), ImageFormat::Unsupported);
        assert_eq!(classify(&[0x89]), ImageFormat::Unsupported);
        assert_eq!(classify(&[0xFF]), ImageFormat::Unsupported);
    }

    #[test]
    fn test_classify_exact_signature_length() {
        // A buffer that is nothing but the signature still matches
        assert_eq!(classify(PNG_SIGNATURE), ImageFormat::Png);
        assert_eq!(classify(JPEG_SIGNATURE), ImageFormat::Jpeg);
    }

    #[test]
    fn test_classify_truncated_png_signature() {
        // 7 of the 8 PNG signature bytes
        assert_eq!(classify(&PNG_SIGNATURE[..7]), ImageFormat::Unsupported);
    }
}
