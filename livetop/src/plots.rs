//! The three plots and their lines: everything the renderer needs per frame.

use chrono::{DateTime, Local};
use ratatui::style::Color;

use crate::history::{RollingSeries, WINDOW};
use crate::types::{Reading, TickReport};
use crate::ui::theme;

/// Y axis behaviour of a plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    /// Fixed 0..=100.
    Percent,
    /// Fit to the data currently in the window.
    Auto,
}

#[derive(Debug, Clone)]
pub struct Line {
    pub label: &'static str,
    pub color: Color,
    pub series: RollingSeries,
    /// Last tick's read for this line failed.
    pub stale: bool,
}

impl Line {
    pub fn new(label: &'static str, color: Color) -> Self {
        Self {
            label,
            color,
            series: RollingSeries::new(WINDOW),
            stale: false,
        }
    }

    /// Push a fresh value, or repeat the previous one for a stale reading.
    pub fn record(&mut self, reading: Reading) {
        let v = match reading {
            Reading::Fresh(v) => v,
            Reading::Stale => self.series.latest(),
        };
        self.series.push(v);
        self.stale = reading.is_stale();
    }
}

#[derive(Debug, Clone)]
pub struct Plot {
    pub title: &'static str,
    pub unit: &'static str,
    pub scale: Scale,
    pub lines: Vec<Line>,
}

impl Plot {
    pub fn is_stale(&self) -> bool {
        self.lines.iter().any(|l| l.stale)
    }

    /// Y bounds for the chart. Auto plots always include zero and never
    /// collapse to an empty range.
    pub fn y_bounds(&self) -> [f64; 2] {
        match self.scale {
            Scale::Percent => [0.0, 100.0],
            Scale::Auto => {
                let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
                let lo = self
                    .lines
                    .iter()
                    .map(|l| finite(l.series.min()))
                    .fold(0.0, f64::min);
                let hi = self
                    .lines
                    .iter()
                    .map(|l| finite(l.series.max()))
                    .fold(0.0, f64::max);
                [lo, if hi - lo < 1.0 { lo + 1.0 } else { hi }]
            }
        }
    }
}

/// CPU, RAM and network plots, created zeroed at startup and updated once per tick.
#[derive(Debug, Clone)]
pub struct PlotState {
    pub cpu: Plot,
    pub mem: Plot,
    pub net: Plot,
    pub last_sample: Option<DateTime<Local>>,
}

impl PlotState {
    pub fn new() -> Self {
        Self {
            cpu: Plot {
                title: "CPU Usage (%)",
                unit: "%",
                scale: Scale::Percent,
                lines: vec![Line::new("cpu", theme::CPU_LINE)],
            },
            mem: Plot {
                title: "RAM Usage (%)",
                unit: "%",
                scale: Scale::Percent,
                lines: vec![Line::new("ram", theme::MEM_LINE)],
            },
            net: Plot {
                title: "Network I/O (KB/s)",
                unit: " KB/s",
                scale: Scale::Auto,
                lines: vec![
                    Line::new("sent", theme::NET_SENT_LINE),
                    Line::new("recv", theme::NET_RECV_LINE),
                ],
            },
            last_sample: None,
        }
    }

    pub fn apply(&mut self, report: &TickReport) {
        self.cpu.lines[0].record(report.cpu);
        self.mem.lines[0].record(report.memory);
        self.net.lines[0].record(report.net_sent);
        self.net.lines[1].record(report.net_recv);
        self.last_sample = Some(Local::now());
    }

    pub fn cpu_series(&self) -> &RollingSeries {
        &self.cpu.lines[0].series
    }

    pub fn mem_series(&self) -> &RollingSeries {
        &self.mem.lines[0].series
    }

    pub fn net_sent_series(&self) -> &RollingSeries {
        &self.net.lines[0].series
    }

    pub fn net_recv_series(&self) -> &RollingSeries {
        &self.net.lines[1].series
    }

    pub fn plots(&self) -> [&Plot; 3] {
        [&self.cpu, &self.mem, &self.net]
    }
}

impl Default for PlotState {
    fn default() -> Self {
        Self::new()
    }
}
