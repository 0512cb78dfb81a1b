//! Shared command line plumbing

pub mod cli;
pub use cli::DemuxArgs;
