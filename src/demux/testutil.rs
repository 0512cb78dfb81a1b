//! Synthetic capture construction for unit tests

use super::layout::{SIGNATURE_PATTERN, SIGNATURE_WORDS32};
use super::stream::RawStream;

/// Builds a capture as a list of 32-bit words
pub struct CaptureBuilder {
    pub transient_length: usize,
    pub words: Vec<u32>,
    sample_count: u32,
}

impl CaptureBuilder {
    pub fn new(transient_length: usize) -> Self {
        Self {
            transient_length,
            words: Vec::new(),
            sample_count: 0,
        }
    }

    pub fn garbage(mut self, n: usize) -> Self {
        self.words.extend((0..n as u32).map(|i| 0x0bad_0000 | i));
        self
    }

    pub fn signature(mut self) -> Self {
        self.words.extend_from_slice(&SIGNATURE_PATTERN);
        self.words
            .resize(self.words.len() + SIGNATURE_WORDS32 - SIGNATURE_PATTERN.len(), 0);
        self
    }

    /// One burst of samples: facet counts samples within the burst,
    /// analog channel `c` of sample `n` holds `n * 4 + c`.
    pub fn samples(self, index: u32) -> Self {
        self.samples_with_flags(index, false, false)
    }

    /// As `samples`, with bit 31 set on FACET and/or INDEX of every sample
    pub fn samples_with_flags(mut self, index: u32, facet_msb: bool, index_msb: bool) -> Self {
        for i in 0..self.transient_length as u32 {
            let n = self.sample_count;
            let ch = |c: u32| ((n * 4 + c) & 0x7fff) as u16 as u32;
            self.words.push(ch(0) | (ch(1) << 16));
            self.words.push(ch(2) | (ch(3) << 16));
            self.words.push(i | if facet_msb { 0x8000_0000 } else { 0 });
            self.words.push(index | if index_msb { 0x8000_0000 } else { 0 });
            self.words.push(n);
            self.words.push(n * 10);
            self.sample_count += 1;
        }
        self
    }

    /// Signature followed by one burst
    pub fn burst(self, index: u32) -> Self {
        self.signature().samples(index)
    }

    pub fn truncate_words(mut self, n: usize) -> Self {
        self.words.truncate(self.words.len() - n);
        self
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    pub fn stream(&self) -> RawStream {
        RawStream::new(self.bytes()).unwrap()
    }
}
