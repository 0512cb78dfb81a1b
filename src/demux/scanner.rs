//! Frame synchronization
//!
//! The capture carries no framing besides event signatures. The scanner
//! locks on to the first signature, then steps one burst stride at a time
//! until a boundary shows the INDEX field incrementing by one. That
//! boundary fixes which burst is burst zero.
//!
//! # Design Principles (KISS)
//! - Offsets are absolute 32-bit word indices into the capture
//! - Offset arithmetic is checked; running past `usize` is end of buffer
//! - A missing signature at a stride step is fatal, never resynchronised

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{FramingError, FramingResult};
use super::layout::{
    burst_stride, NEXT_INDEX, PREV_INDEX, SIGNATURE_WORDS32, VALUE_MASK, WORDS32_PER_SAMPLE,
};
use super::signature::{find_signature, is_signature};
use super::stream::RawStream;

/// How INDEX values on either side of a boundary are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexContinuity {
    /// `before + 1 == after`
    Exact,
    /// As `Exact`, with bit 31 masked off both values
    MaskedMsb,
}

impl IndexContinuity {
    pub fn holds(self, before: u32, after: u32) -> bool {
        match self {
            Self::Exact => before.wrapping_add(1) == after,
            Self::MaskedMsb => (before & VALUE_MASK).wrapping_add(1) == (after & VALUE_MASK),
        }
    }
}

/// Where the scanner locked on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSync {
    /// 32-bit word offset of the first signature in the buffer
    pub first_signature: usize,
    /// 32-bit word offset of the signature leading burst zero
    pub zero_burst: usize,
    /// Distance between signatures in 32-bit words
    pub stride: usize,
}

/// INDEX values before and after the signature at `offset`
///
/// `None` if the signature is not preceded or followed by a full sample.
pub(crate) fn boundary_indices(stream: &RawStream, offset: usize) -> Option<(u32, u32)> {
    if offset < WORDS32_PER_SAMPLE {
        return None;
    }
    let before = stream.word32(offset - PREV_INDEX)?;
    let after = stream.word32(offset + NEXT_INDEX)?;
    Some((before, after))
}

/// Locate burst zero
pub fn find_zero_burst(
    stream: &RawStream,
    transient_length: usize,
    continuity: IndexContinuity,
) -> FramingResult<FrameSync> {
    if transient_length == 0 {
        return Err(FramingError::InvalidTransientLength);
    }
    let stride = burst_stride(transient_length).ok_or(FramingError::InvalidTransientLength)?;

    let first_signature = find_signature(stream, 0).ok_or(FramingError::NoSignatureFound)?;
    debug!(first_signature, "Found first event signature");

    let mut next = first_signature.checked_add(stride);
    let mut boundaries_checked = 0usize;

    // A boundary needs its signature and one full sample after it
    while let Some(offset) = next.filter(|&offset| {
        offset
            .checked_add(SIGNATURE_WORDS32 + WORDS32_PER_SAMPLE)
            .is_some_and(|end| end <= stream.len32())
    }) {
        if !is_signature(stream, offset) {
            return Err(FramingError::MisalignedSignature { offset });
        }
        boundaries_checked += 1;

        if let Some((before, after)) = boundary_indices(stream, offset) {
            if continuity.holds(before, after) {
                let zero_burst = offset - stride;
                debug!(
                    boundary = offset,
                    zero_burst,
                    sample = offset / WORDS32_PER_SAMPLE,
                    index_before = before,
                    index_after = after,
                    "Validated burst boundary"
                );
                return Ok(FrameSync {
                    first_signature,
                    zero_burst,
                    stride,
                });
            }
            debug!(boundary = offset, before, after, "Index did not increment");
        }
        next = offset.checked_add(stride);
    }

    Err(FramingError::NoValidBoundary { boundaries_checked })
}
