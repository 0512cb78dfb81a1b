//! Decoded channel data

use serde::Serialize;
use xxhash_rust::xxh64::Xxh64;

use super::layout::ANALOG_CHANNELS;

/// Physical and metadata channels of one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Channel {
    Ch01,
    Ch02,
    Ch03,
    Ch04,
    Facet,
    Index,
    SampleCount,
    UsecCount,
    /// Digital line packed in FACET bit 31 (msb_direct only)
    Di2,
    /// Digital line packed in INDEX bit 31 (msb_direct only)
    Di4,
}

impl Channel {
    pub const ALL: [Channel; 10] = [
        Channel::Ch01,
        Channel::Ch02,
        Channel::Ch03,
        Channel::Ch04,
        Channel::Facet,
        Channel::Index,
        Channel::SampleCount,
        Channel::UsecCount,
        Channel::Di2,
        Channel::Di4,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Channel::Ch01 => "CH01",
            Channel::Ch02 => "CH02",
            Channel::Ch03 => "CH03",
            Channel::Ch04 => "CH04",
            Channel::Facet => "FACET",
            Channel::Index => "INDEX",
            Channel::SampleCount => "Sample Count",
            Channel::UsecCount => "usec Count",
            Channel::Di2 => "DI2",
            Channel::Di4 => "DI4",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Borrowed view of one channel sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelData<'a> {
    Analog(&'a [i16]),
    Metadata(&'a [u32]),
    Digital(&'a [bool]),
}

impl ChannelData<'_> {
    pub fn len(&self) -> usize {
        match self {
            ChannelData::Analog(v) => v.len(),
            ChannelData::Metadata(v) => v.len(),
            ChannelData::Digital(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Digital lines split out of FACET and INDEX bit 31
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DigitalLines {
    pub di2: Vec<bool>,
    pub di4: Vec<bool>,
}

/// Demultiplexed capture
///
/// Every channel sequence holds `transient_length * burst_count` samples
/// in burst order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedResult {
    /// Samples per burst
    pub transient_length: usize,
    /// Complete bursts decoded
    pub burst_count: usize,
    /// 32-bit word offset of the signature leading burst zero
    pub zero_burst_offset: usize,
    /// CH01..CH04, signed 16-bit
    pub analog: [Vec<i16>; ANALOG_CHANNELS],
    pub facet: Vec<u32>,
    pub index: Vec<u32>,
    pub sample_count: Vec<u32>,
    pub usec_count: Vec<u32>,
    /// Present in msb_direct mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digital: Option<DigitalLines>,
    /// Burst numbers whose leading boundary did not increment INDEX
    pub discontinuities: Vec<usize>,
    /// No boundary after burst zero broke INDEX continuity
    pub valid: bool,
}

impl DecodedResult {
    /// Samples per channel
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn channel(&self, channel: Channel) -> Option<ChannelData<'_>> {
        let data = match channel {
            Channel::Ch01 => ChannelData::Analog(&self.analog[0]),
            Channel::Ch02 => ChannelData::Analog(&self.analog[1]),
            Channel::Ch03 => ChannelData::Analog(&self.analog[2]),
            Channel::Ch04 => ChannelData::Analog(&self.analog[3]),
            Channel::Facet => ChannelData::Metadata(&self.facet),
            Channel::Index => ChannelData::Metadata(&self.index),
            Channel::SampleCount => ChannelData::Metadata(&self.sample_count),
            Channel::UsecCount => ChannelData::Metadata(&self.usec_count),
            Channel::Di2 => ChannelData::Digital(&self.digital.as_ref()?.di2),
            Channel::Di4 => ChannelData::Digital(&self.digital.as_ref()?.di4),
        };
        Some(data)
    }

    /// All decoded channels in display order
    pub fn channels(&self) -> impl Iterator<Item = (Channel, ChannelData<'_>)> + '_ {
        Channel::ALL
            .into_iter()
            .filter_map(move |ch| self.channel(ch).map(|data| (ch, data)))
    }

    /// xxHash64 over every channel's little-endian samples, in channel order
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = Xxh64::new(0);
        for (_, data) in self.channels() {
            match data {
                ChannelData::Analog(v) => v.iter().for_each(|s| hasher.update(&s.to_le_bytes())),
                ChannelData::Metadata(v) => v.iter().for_each(|s| hasher.update(&s.to_le_bytes())),
                ChannelData::Digital(v) => v.iter().for_each(|&s| hasher.update(&[s as u8])),
            }
        }
        hasher.digest()
    }
}
