//! Shared UI theme constants.

use ratatui::style::Color;

pub const AXIS: Color = Color::White;
pub const CPU_LINE: Color = Color::Cyan;
pub const MEM_LINE: Color = Color::Green;
pub const NET_SENT_LINE: Color = Color::Yellow;
pub const NET_RECV_LINE: Color = Color::Magenta;
pub const STALE: Color = Color::Red;
