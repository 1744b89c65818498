//! Top header with hostname and time of the last sample.

use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders},
};

pub fn draw_header(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    hostname: Option<&str>,
    last_sample: Option<DateTime<Local>>,
) {
    let host = hostname.unwrap_or("localhost");
    let title = match last_sample {
        Some(t) => format!(
            "livetop | host: {host} | sampled {}  (press 'q' to quit)",
            t.format("%H:%M:%S")
        ),
        None => format!("livetop | host: {host} | waiting for first sample...  (press 'q' to quit)"),
    };
    f.render_widget(Block::default().title(title).borders(Borders::BOTTOM), area);
}
