//! Scrolling line chart for one plot (one or more lines over the rolling window).

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
};

use crate::plots::{Plot, Scale};
use crate::ui::theme;

pub fn plot_title(plot: &Plot) -> String {
    let now: Vec<String> = plot
        .lines
        .iter()
        .map(|l| {
            if plot.lines.len() > 1 {
                format!("{} {:.1}{}", l.label, l.series.latest(), plot.unit)
            } else {
                format!("{:.1}{}", l.series.latest(), plot.unit)
            }
        })
        .collect();
    let mut title = format!("{} (now: {})", plot.title, now.join(", "));
    if plot.is_stale() {
        title.push_str(" [stale]");
    }
    title
}

fn y_labels(scale: Scale, [lo, hi]: [f64; 2]) -> Vec<Span<'static>> {
    let fmt = |v: f64| match scale {
        Scale::Percent => format!("{v:.0}"),
        Scale::Auto => format!("{v:.1}"),
    };
    vec![
        Span::raw(fmt(lo)),
        Span::raw(fmt((lo + hi) / 2.0)),
        Span::raw(fmt(hi)),
    ]
}

pub fn draw_plot(f: &mut ratatui::Frame<'_>, area: Rect, plot: &Plot, marker: Marker) {
    let points: Vec<Vec<(f64, f64)>> = plot.lines.iter().map(|l| l.series.points()).collect();
    let datasets: Vec<Dataset> = plot
        .lines
        .iter()
        .zip(&points)
        .map(|(l, pts)| {
            Dataset::default()
                .name(l.label)
                .marker(marker)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(l.color))
                .data(pts)
        })
        .collect();

    let window = plot.lines.first().map(|l| l.series.capacity()).unwrap_or(1);
    let x_max = window.saturating_sub(1).max(1) as f64;
    let y_bounds = plot.y_bounds();

    let title_style = if plot.is_stale() {
        Style::default().fg(theme::STALE).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(Span::styled(plot_title(plot), title_style)));

    let axis_style = Style::default().fg(theme::AXIS);
    let mut chart = Chart::new(datasets)
        .block(block)
        .x_axis(Axis::default().style(axis_style).bounds([0.0, x_max]))
        .y_axis(
            Axis::default()
                .style(axis_style)
                .bounds(y_bounds)
                .labels(y_labels(plot.scale, y_bounds)),
        );
    if plot.lines.len() < 2 {
        chart = chart.hidden_legend_constraints((
            ratatui::layout::Constraint::Length(0),
            ratatui::layout::Constraint::Length(0),
        ));
    }
    f.render_widget(chart, area);
}
