//! cs-demux: demultiplexer for cs multi-channel digitizer captures
//!
//! This crate splits a raw capture of interleaved analog and metadata
//! words into one sequence per channel, synchronising on event signatures.

pub mod common;
pub mod config;
pub mod demux;
pub mod summary;
