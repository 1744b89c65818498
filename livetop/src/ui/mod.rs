//! UI module root: the renderer seam used by the sample loop and the dashboard layout.

pub mod header;
pub mod plot;
pub mod theme;

use std::io;

use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    symbols::Marker,
    Terminal,
};

use crate::plots::PlotState;
use header::draw_header;
use plot::draw_plot;

/// Draws the current plot contents. Called once at loop entry and after every tick.
pub trait Renderer {
    fn draw(&mut self, plots: &PlotState) -> io::Result<()>;
}

/// Static inputs to every frame.
#[derive(Debug, Clone)]
pub struct View {
    pub hostname: Option<String>,
    pub marker: Marker,
}

impl Default for View {
    fn default() -> Self {
        Self {
            hostname: None,
            marker: Marker::Braille,
        }
    }
}

pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
    view: View,
}

impl<B: Backend> TerminalRenderer<B> {
    pub fn new(terminal: Terminal<B>, view: View) -> Self {
        Self { terminal, view }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

impl<B: Backend> Renderer for TerminalRenderer<B> {
    fn draw(&mut self, plots: &PlotState) -> io::Result<()> {
        let view = &self.view;
        self.terminal.draw(|f| draw_dashboard(f, plots, view))?;
        Ok(())
    }
}

pub fn draw_dashboard(f: &mut ratatui::Frame<'_>, plots: &PlotState, view: &View) {
    let area = f.area();

    // Root rows: header, cpu + ram, network
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Percentage(47),
            Constraint::Min(6),
        ])
        .split(area);

    draw_header(f, rows[0], view.hostname.as_deref(), plots.last_sample);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    draw_plot(f, top[0], &plots.cpu, view.marker);
    draw_plot(f, top[1], &plots.mem, view.marker);
    draw_plot(f, rows[2], &plots.net, view.marker);
}
