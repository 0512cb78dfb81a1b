//! Fixed sample geometry of a cs capture
//!
//! One sample, viewed as 32-bit words:
//! ```text
//! <ACQ420    ><QEN          ><AGG         >
//! <AI12><AI34><FACET><INDEX><AGSAM><USEC>
//! ```
//! The same sample viewed as 16-bit words holds the four analog channels
//! in words 0..4, followed by the metadata words split in halves.

/// 16-bit words per sample
pub const WORDS16_PER_SAMPLE: usize = 12;
/// 32-bit words per sample
pub const WORDS32_PER_SAMPLE: usize = 6;

/// Event signature length in samples
pub const SIGNATURE_SAMPLES: usize = 4;
/// Event signature length in 32-bit words
pub const SIGNATURE_WORDS32: usize = WORDS32_PER_SAMPLE * SIGNATURE_SAMPLES;

/// Magic words at the head of every event signature
pub const SIGNATURE_PATTERN: [u32; 4] = [0xaa55_f154, 0xaa55_f154, 0xaa55_f15f, 0xaa55_f15f];

pub mod field {
    pub const AI0102: usize = 0;
    pub const AI0304: usize = 1;
    pub const FACET: usize = 2;
    pub const INDEX: usize = 3;
    pub const AGSAM: usize = 4;
    pub const USEC: usize = 5;

    /// First metadata word within a 32-bit sample
    pub const METADATA_BASE: usize = FACET;
}

/// Look back from a signature to INDEX in the previous sample
pub const PREV_INDEX: usize = WORDS32_PER_SAMPLE - field::INDEX;
/// Look forward from a signature to INDEX in the first sample after it
pub const NEXT_INDEX: usize = SIGNATURE_WORDS32 + field::INDEX;

/// Analog (16-bit) channels per sample
pub const ANALOG_CHANNELS: usize = 4;
/// Metadata (32-bit) channels per sample
pub const METADATA_CHANNELS: usize = 4;

/// Bit 31 of a metadata word, carrying a digital line in msb_direct mode
pub const MSB_MASK: u32 = 0x8000_0000;
/// Metadata word with bit 31 cleared
pub const VALUE_MASK: u32 = 0x7fff_ffff;

/// Distance in 32-bit words between consecutive signatures
///
/// `None` if the stride does not fit in a `usize`.
pub fn burst_stride(transient_length: usize) -> Option<usize> {
    transient_length
        .checked_mul(WORDS32_PER_SAMPLE)?
        .checked_add(SIGNATURE_WORDS32)
}
