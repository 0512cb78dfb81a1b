//! cs-demux - demultiplex a cs digitizer capture and summarise its channels
//!
//! Usage:
//!   cs-demux --data-file /data/acq2106_112/000001/0000
//!   cs-demux --data-file shot_data --transient-length 8192 --msb-direct --facets 4
//!   cs-demux -f demux.toml --json

use anyhow::Context;
use clap::Parser;
use cs_demux::common::DemuxArgs;
use cs_demux::config::Config;
use cs_demux::demux::demux;
use cs_demux::summary::DecodedSummary;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = DemuxArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(args.log_directive().parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config_file {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };
    let config = args.apply(config);
    config.validate()?;

    let data = std::fs::read(&args.data_file)
        .with_context(|| format!("reading capture {}", args.data_file.display()))?;
    info!(
        file = %args.data_file.display(),
        bytes = data.len(),
        transient_length = config.demux.transient_length,
        msb_direct = config.demux.msb_direct,
        "Decoding capture"
    );

    let result = demux(data, &config.demux)
        .with_context(|| format!("decoding {}", args.data_file.display()))?;
    info!(
        bursts = result.burst_count,
        samples = result.len(),
        valid = result.valid,
        "Decoded capture"
    );

    let summary = DecodedSummary::new(&result, config.display.facets);
    if config.display.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", summary);
    }

    Ok(())
}
