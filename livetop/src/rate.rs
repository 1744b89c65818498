//! Throughput derivation from two cumulative byte counter readings.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// What to do when a counter goes backwards between ticks (interface reset,
/// counter wrap, driver reload).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegressionPolicy {
    /// Report the negative rate so the anomaly is visible on the plot.
    #[default]
    PassThrough,
    /// Report 0.0 instead.
    Clamp,
}

impl FromStr for RegressionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "pass_through" | "passthrough" => Ok(Self::PassThrough),
            "clamp" => Ok(Self::Clamp),
            other => Err(format!(
                "unknown regression mode '{other}' (expected pass-through or clamp)"
            )),
        }
    }
}

impl fmt::Display for RegressionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PassThrough => "pass-through",
            Self::Clamp => "clamp",
        })
    }
}

/// Round half away from zero to one decimal place.
pub fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// KB/s between two counter readings taken `elapsed_secs` apart.
///
/// The result is rounded to one decimal with [`round_tenth`]. A zero, negative
/// or non-finite interval yields `0.0`.
pub fn kb_per_sec(prev: u64, curr: u64, elapsed_secs: f64, policy: RegressionPolicy) -> f64 {
    if !elapsed_secs.is_finite() || elapsed_secs <= 0.0 {
        return 0.0;
    }
    let delta = (i128::from(curr) - i128::from(prev)) as f64;
    let rate = delta / 1024.0 / elapsed_secs;
    let rate = match policy {
        RegressionPolicy::PassThrough => rate,
        RegressionPolicy::Clamp => rate.max(0.0),
    };
    round_tenth(rate)
}
