//! Burst extraction
//!
//! Walks the capture from burst zero in steps of one burst stride and
//! slices every channel out of each burst. The first pass counts complete
//! bursts so the second can fill exact-capacity sequences.
//!
//! # Design Principles (KISS)
//! - Burst zero comes from the scanner; its stride is already known to fit
//! - Bursts cut short by the end of the capture are dropped whole
//! - INDEX breaks after burst zero are recorded, not fatal

use tracing::{debug, warn};

use super::common::DecodedResult;
use super::error::{FramingError, FramingResult};
use super::layout::{
    burst_stride, field, ANALOG_CHANNELS, METADATA_CHANNELS, SIGNATURE_WORDS32, WORDS16_PER_SAMPLE,
    WORDS32_PER_SAMPLE,
};
use super::scanner::{boundary_indices, FrameSync, IndexContinuity};
use super::signature::is_signature;
use super::stream::RawStream;

/// Complete bursts from burst zero, and the bursts whose leading
/// boundary broke INDEX continuity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BurstCount {
    pub bursts: usize,
    pub discontinuities: Vec<usize>,
}

/// First pass: count bursts and check every boundary after burst zero
pub fn count_bursts(
    stream: &RawStream,
    sync: &FrameSync,
    transient_length: usize,
    continuity: IndexContinuity,
) -> FramingResult<BurstCount> {
    let burst_words = burst_stride(transient_length).ok_or(FramingError::InvalidTransientLength)?;
    let mut bursts = 0usize;
    let mut discontinuities = Vec::new();

    loop {
        let Some(offset) = bursts
            .checked_mul(sync.stride)
            .and_then(|step| step.checked_add(sync.zero_burst))
        else {
            break;
        };
        let fits = offset
            .checked_add(burst_words)
            .is_some_and(|end| end <= stream.len32());
        if !fits {
            if offset < stream.len32() {
                debug!(
                    offset,
                    words = stream.len32() - offset,
                    "Dropping truncated final burst"
                );
            }
            break;
        }

        if bursts > 0 {
            if !is_signature(stream, offset) {
                return Err(FramingError::MisalignedSignature { offset });
            }
            if let Some((before, after)) = boundary_indices(stream, offset) {
                if !continuity.holds(before, after) {
                    warn!(
                        burst = bursts,
                        offset, before, after, "Index discontinuity at burst boundary"
                    );
                    discontinuities.push(bursts);
                }
            }
        }
        bursts += 1;
    }

    Ok(BurstCount {
        bursts,
        discontinuities,
    })
}

/// Second pass: slice every channel out of `bursts` complete bursts
pub fn extract_bursts(
    stream: &RawStream,
    sync: &FrameSync,
    transient_length: usize,
    count: BurstCount,
) -> DecodedResult {
    let total = transient_length * count.bursts;
    let mut analog: [Vec<i16>; ANALOG_CHANNELS] =
        std::array::from_fn(|_| Vec::with_capacity(total));
    let mut metadata: [Vec<u32>; METADATA_CHANNELS] =
        std::array::from_fn(|_| Vec::with_capacity(total));

    for burst in 0..count.bursts {
        let base32 = sync.zero_burst + burst * sync.stride + SIGNATURE_WORDS32;
        let base16 = base32 * 2;

        for (ch, seq) in analog.iter_mut().enumerate() {
            seq.extend(stream.strided16(base16 + ch, WORDS16_PER_SAMPLE, transient_length));
        }
        for (ch, seq) in metadata.iter_mut().enumerate() {
            seq.extend(stream.strided32(
                base32 + field::METADATA_BASE + ch,
                WORDS32_PER_SAMPLE,
                transient_length,
            ));
        }
    }

    let [facet, index, sample_count, usec_count] = metadata;
    debug!(
        bursts = count.bursts,
        samples = total,
        "Extracted channel sequences"
    );

    DecodedResult {
        transient_length,
        burst_count: count.bursts,
        zero_burst_offset: sync.zero_burst,
        analog,
        facet,
        index,
        sample_count,
        usec_count,
        digital: None,
        valid: count.discontinuities.is_empty(),
        discontinuities: count.discontinuities,
    }
}
