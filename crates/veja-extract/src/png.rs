//! Text extraction from PNG chunk structure.
//!
//! PNG chunks are parsed natively: 4-byte length (big-endian), 4-byte type,
//! `length` bytes of data, 4-byte CRC (not validated). Generation tools embed
//! their parameter text in `tEXt` (`keyword\0text`) and `iTXt`
//! (`keyword\0 flags languageTag\0 translatedKeyword\0 text`) chunks.
//!
//! Compressed iTXt chunks (compression flag set) are not inflated: the
//! last-NUL split below will yield garbage text for them, which the
//! downstream parser simply fails to match. Compressed text chunks are rare
//! in generator output, so no zlib dependency is carried for them.

use tracing::debug;

use crate::sniff::PNG_SIGNATURE;

/// Byte length of a chunk header (length + type) plus the trailing CRC.
const CHUNK_OVERHEAD: usize = 12;

/// Extract embedded text from a PNG buffer.
///
/// Walks every chunk, collecting the text payload of each `tEXt`/`iTXt`
/// chunk in container order, and returns them joined with newlines. Returns
/// `None` when the signature does not match (re-validated here rather than
/// trusting the caller) or no textual chunk was found.
///
/// Truncated or malformed chunk structure stops the walk at the last chunk
/// that fit inside the buffer; whatever was collected up to that point is
/// still returned.
pub fn read_text(buffer: &[u8]) -> Option<String> {
    if buffer.len() < PNG_SIGNATURE.len() || &buffer[..PNG_SIGNATURE.len()] != PNG_SIGNATURE {
        return None;
    }

    let mut texts: Vec<String> = Vec::new();
    let mut offset = PNG_SIGNATURE.len();

    while buffer.len() - offset >= CHUNK_OVERHEAD {
        let length = u32::from_be_bytes([
            buffer[offset],
            buffer[offset + 1],
            buffer[offset + 2],
            buffer[offset + 3],
        ]) as usize;
        let chunk_type = &buffer[offset + 4..offset + 8];
        let data_start = offset + 8;

        // Declared length must leave room for the CRC inside the buffer.
        if length > buffer.len() - data_start - 4 {
            debug!(
                "png chunk length {} overruns buffer at offset {}, stopping walk",
                length, offset
            );
            break;
        }

        let data = &buffer[data_start..data_start + length];
        match chunk_type {
            b"tEXt" => texts.push(text_chunk_payload(data)),
            b"iTXt" => texts.push(itxt_chunk_payload(data)),
            _ => {}
        }

        offset = data_start + length + 4;
    }

    if texts.is_empty() {
        None
    } else {
        Some(texts.join("\n"))
    }
}

/// tEXt payload is `keyword\0text`: keep the text after the first NUL, or
/// the whole payload when no NUL is present.
fn text_chunk_payload(data: &[u8]) -> String {
    match data.iter().position(|&b| b == 0) {
        Some(pos) => String::from_utf8_lossy(&data[pos + 1..]).into_owned(),
        None => String::from_utf8_lossy(data).into_owned(),
    }
}

/// iTXt carries keyword, compression flag/method, language tag, and
/// translated keyword before the text, each NUL-terminated: splitting on the
/// last NUL and keeping the rest recovers the text without tracking the
/// intermediate fields.
fn itxt_chunk_payload(data: &[u8]) -> String {
    match data.iter().rposition(|&b| b == 0) {
        Some(pos) => String::from_utf8_lossy(&data[pos + 1..]).into_owned(),
        None => String::from_utf8_lossy(data).into_owned(),
    }
}
