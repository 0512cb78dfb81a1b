//! CLI argument parsing for cs-demux
//!
//! Flags left unset fall back to the configuration file, then to the
//! built-in defaults.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

#[derive(Parser, Debug, Clone)]
#[command(name = "cs-demux")]
#[command(about = "Demultiplex cs digitizer captures into per-channel sequences")]
#[command(version)]
pub struct DemuxArgs {
    /// Capture file to decode
    #[arg(long = "data-file", default_value = "./shot_data")]
    pub data_file: PathBuf,

    /// Path to configuration file
    #[arg(short = 'f', long = "config")]
    pub config_file: Option<PathBuf>,

    /// Samples per burst
    #[arg(long = "transient-length")]
    pub transient_length: Option<usize>,

    /// DI2/DI4 embedded in bit 31 of FACET/INDEX
    #[arg(long = "msb-direct")]
    pub msb_direct: bool,

    /// Number of facets to summarise
    #[arg(long)]
    pub facets: Option<usize>,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl DemuxArgs {
    /// Apply command line overrides on top of `config`
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(transient_length) = self.transient_length {
            config.demux.transient_length = transient_length;
        }
        if self.msb_direct {
            config.demux.msb_direct = true;
        }
        if self.facets.is_some() {
            config.display.facets = self.facets;
        }
        if self.json {
            config.display.json = true;
        }
        config
    }

    /// Log level directive for this crate
    pub fn log_directive(&self) -> &'static str {
        if self.quiet {
            return "cs_demux=error";
        }
        match self.verbose {
            0 => "cs_demux=info",
            1 => "cs_demux=debug",
            _ => "cs_demux=trace",
        }
    }
}
