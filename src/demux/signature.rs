//! Event signature matching

use super::layout::SIGNATURE_PATTERN;
use super::stream::RawStream;

/// True if the signature pattern starts at 32-bit word `index`
///
/// Near the end of the buffer this is simply `false`.
pub fn is_signature(stream: &RawStream, index: usize) -> bool {
    SIGNATURE_PATTERN
        .iter()
        .enumerate()
        .all(|(i, &magic)| stream.word32(index + i) == Some(magic))
}

/// First signature at or after 32-bit word `from`
pub fn find_signature(stream: &RawStream, from: usize) -> Option<usize> {
    let last = stream.len32().checked_sub(SIGNATURE_PATTERN.len())?;
    (from..=last).find(|&pos| is_signature(stream, pos))
}
