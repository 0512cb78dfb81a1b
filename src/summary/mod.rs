//! Channel summaries for decoded captures
//!
//! Consumer-side view of a [`DecodedResult`]: per-channel statistics over
//! a display window of whole facets.

use serde::Serialize;
use tracing::warn;

use crate::demux::{Channel, ChannelData, DecodedResult};

/// Statistics of one channel within the display window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChannelStats {
    Numeric {
        min: Option<i64>,
        max: Option<i64>,
        first: Option<i64>,
        last: Option<i64>,
    },
    Digital {
        set: usize,
    },
}

impl ChannelStats {
    fn numeric(values: impl Iterator<Item = i64> + Clone) -> Self {
        Self::Numeric {
            min: values.clone().min(),
            max: values.clone().max(),
            first: values.clone().next(),
            last: values.last(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelSummary {
    pub channel: Channel,
    pub label: &'static str,
    pub samples: usize,
    #[serde(flatten)]
    pub stats: ChannelStats,
}

impl ChannelSummary {
    fn new(channel: Channel, data: ChannelData<'_>, window: usize) -> Self {
        let stats = match data {
            ChannelData::Analog(v) => {
                ChannelStats::numeric(v[..window].iter().map(|&s| i64::from(s)))
            }
            ChannelData::Metadata(v) => {
                ChannelStats::numeric(v[..window].iter().map(|&s| i64::from(s)))
            }
            ChannelData::Digital(v) => ChannelStats::Digital {
                set: v[..window].iter().filter(|&&b| b).count(),
            },
        };
        Self {
            channel,
            label: channel.label(),
            samples: window,
            stats,
        }
    }
}

/// Summary of a whole decode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedSummary {
    pub transient_length: usize,
    pub burst_count: usize,
    pub samples_per_channel: usize,
    pub window: usize,
    pub valid: bool,
    pub discontinuities: Vec<usize>,
    pub fingerprint: u64,
    pub channels: Vec<ChannelSummary>,
}

/// Samples covered by `facets` facets, or all samples
///
/// Asking for more facets than were decoded falls back to all data.
pub fn display_window(result: &DecodedResult, facets: Option<usize>) -> usize {
    let available = result.len();
    match facets {
        None => available,
        Some(facets) => {
            let wanted = facets.saturating_mul(result.transient_length);
            if wanted > available {
                warn!(
                    facets,
                    available_samples = available,
                    "Not enough facets to display, using all data"
                );
                available
            } else {
                wanted
            }
        }
    }
}

impl DecodedSummary {
    pub fn new(result: &DecodedResult, facets: Option<usize>) -> Self {
        let window = display_window(result, facets);
        Self {
            transient_length: result.transient_length,
            burst_count: result.burst_count,
            samples_per_channel: result.len(),
            window,
            valid: result.valid,
            discontinuities: result.discontinuities.clone(),
            fingerprint: result.fingerprint(),
            channels: result
                .channels()
                .map(|(ch, data)| ChannelSummary::new(ch, data, window))
                .collect(),
        }
    }
}

fn fmt_opt(v: Option<i64>) -> String {
    v.map_or_else(|| "-".to_string(), |v| v.to_string())
}

impl std::fmt::Display for DecodedSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Transient length: {}", self.transient_length)?;
        writeln!(f, "Bursts:           {}", self.burst_count)?;
        writeln!(f, "Samples/channel:  {}", self.samples_per_channel)?;
        writeln!(f, "Window:           {}", self.window)?;
        if self.valid {
            writeln!(f, "Index continuity: ok")?;
        } else {
            writeln!(
                f,
                "Index continuity: broken at bursts {:?}",
                self.discontinuities
            )?;
        }
        writeln!(f, "Fingerprint:      {:016x}", self.fingerprint)?;
        writeln!(f)?;
        writeln!(
            f,
            "{:<14} {:>12} {:>12} {:>12} {:>12}",
            "Channel", "min", "max", "first", "last"
        )?;
        for ch in &self.channels {
            match &ch.stats {
                ChannelStats::Numeric {
                    min,
                    max,
                    first,
                    last,
                } => writeln!(
                    f,
                    "{:<14} {:>12} {:>12} {:>12} {:>12}",
                    ch.label,
                    fmt_opt(*min),
                    fmt_opt(*max),
                    fmt_opt(*first),
                    fmt_opt(*last)
                )?,
                ChannelStats::Digital { set } => writeln!(
                    f,
                    "{:<14} {:>12}/{} set",
                    ch.label, set, ch.samples
                )?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demux::DigitalLines;

    fn result(bursts: usize) -> DecodedResult {
        let t = 2;
        let n = t * bursts;
        DecodedResult {
            transient_length: t,
            burst_count: bursts,
            zero_burst_offset: 0,
            analog: [
                (0..n as i16).map(|v| -v).collect(),
                vec![0; n],
                vec![1; n],
                vec![2; n],
            ],
            facet: (0..n as u32).map(|v| v % 2).collect(),
            index: (0..n as u32).map(|v| v / 2).collect(),
            sample_count: (0..n as u32).collect(),
            usec_count: (0..n as u32).map(|v| v * 10).collect(),
            digital: Some(DigitalLines {
                di2: (0..n).map(|v| v % 2 == 0).collect(),
                di4: vec![false; n],
            }),
            discontinuities: Vec::new(),
            valid: true,
        }
    }

    #[test]
    fn test_window_all_data() {
        assert_eq!(display_window(&result(3), None), 6);
    }

    #[test]
    fn test_window_facets() {
        assert_eq!(display_window(&result(3), Some(2)), 4);
    }

    #[test]
    fn test_window_falls_back_when_too_many_facets() {
        assert_eq!(display_window(&result(3), Some(10)), 6);
        assert_eq!(display_window(&result(3), Some(usize::MAX)), 6);
    }

    #[test]
    fn test_summary_stats() {
        let summary = DecodedSummary::new(&result(3), Some(2));
        assert_eq!(summary.window, 4);
        assert_eq!(summary.channels.len(), 10);

        let ch01 = &summary.channels[0];
        assert_eq!(
            ch01.stats,
            ChannelStats::Numeric {
                min: Some(-3),
                max: Some(0),
                first: Some(0),
                last: Some(-3),
            }
        );

        let di2 = summary
            .channels
            .iter()
            .find(|c| c.channel == Channel::Di2)
            .unwrap();
        assert_eq!(di2.stats, ChannelStats::Digital { set: 2 });
    }

    #[test]
    fn test_empty_window() {
        let summary = DecodedSummary::new(&result(1), Some(0));
        assert_eq!(
            summary.channels[4].stats,
            ChannelStats::Numeric {
                min: None,
                max: None,
                first: None,
                last: None,
            }
        );
    }

    #[test]
    fn test_json_output() {
        let summary = DecodedSummary::new(&result(1), None);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["burst_count"], 1);
        assert_eq!(json["channels"][0]["kind"], "numeric");
        assert_eq!(json["channels"][8]["kind"], "digital");
        assert_eq!(json["channels"][8]["set"], 1);
    }

    #[test]
    fn test_display_reports_discontinuities() {
        let mut r = result(2);
        r.valid = false;
        r.discontinuities = vec![1];
        let text = DecodedSummary::new(&r, None).to_string();
        assert!(text.contains("broken at bursts [1]"));
        assert!(text.contains("INDEX"));
    }
}
