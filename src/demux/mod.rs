//! Demultiplexer for cs digitizer captures
//!
//! Converts a raw capture of interleaved analog and metadata words into
//! one sequence per channel.
//!
//! # Data Format
//!
//! The capture is a repetition of bursts with no header:
//! ```text
//! ┌──────────────────────────────┐
//! │ Event signature (4 samples)  │
//! ├──────────────────────────────┤
//! │ transient_length samples     │
//! │ 6 x u32 each                 │
//! ├──────────────────────────────┤
//! │ Event signature              │
//! ├──────────────────────────────┤
//! │ ...                          │
//! └──────────────────────────────┘
//! ```
//! Burst zero is the burst before the first boundary where INDEX steps
//! by one. A final burst cut short by the end of the capture is dropped.

pub mod bitfield;
pub mod common;
pub mod error;
pub mod extractor;
pub mod layout;
pub mod scanner;
pub mod signature;
pub mod stream;

#[cfg(test)]
pub(crate) mod testutil;

pub use common::{Channel, ChannelData, DecodedResult, DigitalLines};
pub use error::{FramingError, FramingResult};
pub use scanner::{FrameSync, IndexContinuity};
pub use stream::RawStream;

use bytes::Bytes;
use serde::Deserialize;
use tracing::debug;

/// Demultiplexer configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DemuxConfig {
    /// Samples per burst
    #[serde(default = "default_transient_length")]
    pub transient_length: usize,
    /// DI2/DI4 embedded in bit 31 of FACET/INDEX
    #[serde(default)]
    pub msb_direct: bool,
}

fn default_transient_length() -> usize {
    8192
}

impl Default for DemuxConfig {
    fn default() -> Self {
        Self {
            transient_length: default_transient_length(),
            msb_direct: false,
        }
    }
}

impl DemuxConfig {
    pub fn new(transient_length: usize, msb_direct: bool) -> Self {
        Self {
            transient_length,
            msb_direct,
        }
    }

    /// INDEX comparison used at burst boundaries
    pub fn continuity(&self) -> IndexContinuity {
        if self.msb_direct {
            IndexContinuity::MaskedMsb
        } else {
            IndexContinuity::Exact
        }
    }
}

/// Demultiplex a capture buffer
pub fn demux(buffer: impl Into<Bytes>, config: &DemuxConfig) -> FramingResult<DecodedResult> {
    let stream = RawStream::new(buffer)?;
    demux_stream(&stream, config)
}

/// Demultiplex an already wrapped capture
pub fn demux_stream(stream: &RawStream, config: &DemuxConfig) -> FramingResult<DecodedResult> {
    let continuity = config.continuity();
    let sync = scanner::find_zero_burst(stream, config.transient_length, continuity)?;
    let count = extractor::count_bursts(stream, &sync, config.transient_length, continuity)?;
    let mut result = extractor::extract_bursts(stream, &sync, config.transient_length, count);

    if config.msb_direct {
        bitfield::split_digital_lines(&mut result);
    }

    debug!(
        bursts = result.burst_count,
        samples = result.len(),
        valid = result.valid,
        msb_direct = config.msb_direct,
        "Demultiplexed capture"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demux::testutil::CaptureBuilder;

    #[test]
    fn test_default_config() {
        let config = DemuxConfig::default();
        assert_eq!(config.transient_length, 8192);
        assert!(!config.msb_direct);
        assert_eq!(config.continuity(), IndexContinuity::Exact);
    }

    #[test]
    fn test_msb_direct_selects_masked_continuity() {
        let config = DemuxConfig::new(4, true);
        assert_eq!(config.continuity(), IndexContinuity::MaskedMsb);
    }

    #[test]
    fn test_demux_two_bursts() {
        let capture = CaptureBuilder::new(4).burst(10).burst(11);
        let result = demux(capture.bytes(), &DemuxConfig::new(4, false)).unwrap();
        assert_eq!(result.index, vec![10, 10, 10, 10, 11, 11, 11, 11]);
        assert!(result.digital.is_none());
        assert_eq!(result.channels().count(), 8);
    }

    #[test]
    fn test_demux_msb_direct() {
        let capture = CaptureBuilder::new(2)
            .signature()
            .samples_with_flags(3, true, false)
            .signature()
            .samples_with_flags(4, false, true);

        let result = demux(capture.bytes(), &DemuxConfig::new(2, true)).unwrap();
        let digital = result.digital.as_ref().unwrap();

        assert_eq!(result.index, vec![3, 3, 4, 4]);
        assert_eq!(result.facet, vec![0, 1, 0, 1]);
        assert_eq!(digital.di2, vec![true, true, false, false]);
        assert_eq!(digital.di4, vec![false, false, true, true]);
        assert_eq!(result.channels().count(), 10);
    }

    #[test]
    fn test_demux_rejects_overflowing_transient_length() {
        let capture = CaptureBuilder::new(4).burst(0).burst(1).burst(2);
        let err = demux(capture.bytes(), &DemuxConfig::new(usize::MAX / 6, false)).unwrap_err();
        assert_eq!(err, FramingError::InvalidTransientLength);
    }

    #[test]
    fn test_demux_rejects_unaligned_buffer() {
        let err = demux(vec![0u8; 7], &DemuxConfig::default()).unwrap_err();
        assert_eq!(err, FramingError::UnalignedLength { len: 7 });
    }
}
