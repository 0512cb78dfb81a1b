//! msb_direct bit-field split
//!
//! Two digital lines ride in bit 31 of the FACET and INDEX words. The
//! split moves each into its own boolean sequence and clears the bit in
//! the numeric channel.

use super::common::{DecodedResult, DigitalLines};
use super::layout::{MSB_MASK, VALUE_MASK};

/// Take bit 31 out of every value, returning it as a boolean sequence
pub fn split_msb(values: &mut [u32]) -> Vec<bool> {
    values
        .iter_mut()
        .map(|v| {
            let bit = *v & MSB_MASK != 0;
            *v &= VALUE_MASK;
            bit
        })
        .collect()
}

/// Split DI2 out of FACET and DI4 out of INDEX
pub fn split_digital_lines(result: &mut DecodedResult) {
    let di2 = split_msb(&mut result.facet);
    let di4 = split_msb(&mut result.index);
    result.digital = Some(DigitalLines { di2, di4 });
}

/// Inverse of [`split_msb`]
pub fn join_msb(values: &[u32], bits: &[bool]) -> Vec<u32> {
    values
        .iter()
        .zip(bits)
        .map(|(&v, &bit)| v | ((bit as u32) << 31))
        .collect()
}
