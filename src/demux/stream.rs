//! Read-only capture buffer with 16-bit and 32-bit word views

use bytes::Bytes;

use super::error::{FramingError, FramingResult};

const WORD16_SIZE: usize = 2;
const WORD32_SIZE: usize = 4;

/// An immutable capture buffer
///
/// Both views index the same little-endian bytes: 32-bit word `n` spans
/// 16-bit words `2n` and `2n + 1`.
#[derive(Debug, Clone)]
pub struct RawStream {
    data: Bytes,
}

impl RawStream {
    /// Wrap a capture buffer. The length must be a multiple of 4.
    pub fn new(data: impl Into<Bytes>) -> FramingResult<Self> {
        let data = data.into();
        if !data.len().is_multiple_of(WORD32_SIZE) {
            return Err(FramingError::UnalignedLength { len: data.len() });
        }
        Ok(Self { data })
    }

    /// Number of 16-bit words
    pub fn len16(&self) -> usize {
        self.data.len() / WORD16_SIZE
    }

    /// Number of 32-bit words
    pub fn len32(&self) -> usize {
        self.data.len() / WORD32_SIZE
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Signed 16-bit word at `index`, or `None` past the end
    pub fn word16(&self, index: usize) -> Option<i16> {
        let start = index.checked_mul(WORD16_SIZE)?;
        let bytes = self.data.get(start..start + WORD16_SIZE)?;
        Some(i16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Unsigned 32-bit word at `index`, or `None` past the end
    pub fn word32(&self, index: usize) -> Option<u32> {
        let start = index.checked_mul(WORD32_SIZE)?;
        let bytes = self.data.get(start..start + WORD32_SIZE)?;
        Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Strided run of 16-bit words. Caller guarantees the run is in range.
    pub(crate) fn strided16(
        &self,
        start: usize,
        stride: usize,
        count: usize,
    ) -> impl Iterator<Item = i16> + '_ {
        self.data[start * WORD16_SIZE..]
            .chunks_exact(WORD16_SIZE)
            .step_by(stride)
            .take(count)
            .map(|w| i16::from_le_bytes([w[0], w[1]]))
    }

    /// Strided run of 32-bit words. Caller guarantees the run is in range.
    pub(crate) fn strided32(
        &self,
        start: usize,
        stride: usize,
        count: usize,
    ) -> impl Iterator<Item = u32> + '_ {
        self.data[start * WORD32_SIZE..]
            .chunks_exact(WORD32_SIZE)
            .step_by(stride)
            .take(count)
            .map(|w| u32::from_le_bytes([w[0], w[1], w[2], w[3]]))
    }
}
