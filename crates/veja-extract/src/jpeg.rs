//! Text extraction from JPEG marker segments.
//!
//! JPEG files are a sequence of `FF`-prefixed marker segments. Most carry a
//! 2-byte big-endian length that includes the length field itself; the
//! restart/SOI/EOI markers stand alone. Generation tools and editors leave
//! parameter text in the comment segment (COM) and the XMP/IPTC application
//! segments (APP1, APP13).

use tracing::debug;

use veja_core::defaults::PRINTABLE_RATIO_THRESHOLD;

use crate::sniff::JPEG_SIGNATURE;

/// Comment segment.
const MARKER_COM: u8 = 0xFE;
/// APP1, commonly XMP (also EXIF, filtered out by the text heuristic).
const MARKER_APP1: u8 = 0xE1;
/// APP13, commonly IPTC/Photoshop.
const MARKER_APP13: u8 = 0xED;

/// Extract embedded text from a JPEG buffer.
///
/// Walks marker segments from just past SOI, decoding COM/APP1/APP13
/// payloads as UTF-8 and keeping the ones that look like metadata text
/// (see [`keep_segment`]). Kept texts are joined with newlines in segment
/// order; `None` when the signature does not match or nothing was kept.
///
/// An unexpected non-`FF` byte or a length overrunning the buffer stops the
/// walk gracefully; text collected before the stop is still returned.
pub fn read_text(buffer: &[u8]) -> Option<String> {
    if buffer.len() < JPEG_SIGNATURE.len() || &buffer[..JPEG_SIGNATURE.len()] != JPEG_SIGNATURE {
        return None;
    }

    let mut texts: Vec<String> = Vec::new();
    let mut offset = JPEG_SIGNATURE.len();

    while offset + 2 <= buffer.len() {
        if buffer[offset] != 0xFF {
            debug!(
                "unexpected byte {:#04x} where a jpeg marker was expected, stopping walk",
                buffer[offset]
            );
            break;
        }
        let marker = buffer[offset + 1];
        offset += 2;

        // EOI ends the stream; the other standalone markers carry no length.
        if marker == 0xD9 {
            break;
        }
        if (0xD0..=0xD8).contains(&marker) {
            continue;
        }

        if offset + 2 > buffer.len() {
            break;
        }
        let declared = u16::from_be_bytes([buffer[offset], buffer[offset + 1]]) as usize;
        if declared < 2 {
            break;
        }
        let payload_start = offset + 2;
        let payload_len = declared - 2;
        if payload_len > buffer.len() - payload_start {
            debug!(
                "jpeg segment {:#04x} length {} overruns buffer, stopping walk",
                marker, declared
            );
            break;
        }

        if matches!(marker, MARKER_COM | MARKER_APP1 | MARKER_APP13) {
            let payload = &buffer[payload_start..payload_start + payload_len];
            // A payload that is not valid UTF-8 is skipped, not fatal.
            if let Ok(text) = std::str::from_utf8(payload) {
                if keep_segment(text) {
                    texts.push(text.to_string());
                }
            }
        }

        offset = payload_start + payload_len;
    }

    if texts.is_empty() {
        None
    } else {
        Some(texts.join("\n"))
    }
}

/// Heuristic filter for decoded segment text.
///
/// Segments naming a known metadata container (`<x:xmpmeta` for XMP,
/// `parameters` for generator output) are always kept. Anything else is kept
/// only when its printable-ASCII ratio clears the threshold, which discards
/// binary payloads that happened to decode as UTF-8.
fn keep_segment(text: &str) -> bool {
    if text.contains("<x:xmpmeta") || text.contains("parameters") {
        return true;
    }
    printable_ratio(text) > PRINTABLE_RATIO_THRESHOLD
}

/// Fraction of characters in the printable ASCII range `[32, 126]`.
/// An empty string has ratio 0.
fn printable_ratio(text: &str) -> f64 {
    let total = text.chars().count();
    if total == 0 {
        return 0.0;
    }
    let printable = text.chars().filter(|c| (' '..='~').contains(c)).count();
    printable as f64 / total as f64
}
