//! App state and main loop: waits on the tick timer and terminal input, samples
//! metrics into the rolling series, and redraws.

use std::{io, time::Duration};

use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::{Stream, StreamExt};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::metrics::MetricSource;
use crate::plots::PlotState;
use crate::rate::{kb_per_sec, RegressionPolicy};
use crate::types::{CounterSnapshot, Reading, TickReport};
use crate::ui::{Renderer, TerminalRenderer, View};

/// Sampling period. Not user-configurable.
pub const TICK: Duration = Duration::from_secs(1);

/// `interval_at` rejects a zero period.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Terminated,
}

/// Counters reported once the loop exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub ticks: u64,
    pub stale_reads: u64,
    pub regressions: u64,
}

pub struct App<S: MetricSource> {
    source: S,
    plots: PlotState,

    // Last successful network read; rates are derived against it
    prev_net: Option<CounterSnapshot>,
    // Ticks since prev_net was taken (1 unless network reads failed in between)
    ticks_since_net: u32,

    state: LoopState,
    stats: LoopStats,
    period: Duration,
    regression: RegressionPolicy,
    marker: ratatui::symbols::Marker,
    log_ticks: bool,
}

impl<S: MetricSource> App<S> {
    /// Takes the baseline network snapshot and builds zeroed plots.
    pub fn new(mut source: S, cfg: &Config) -> Self {
        let prev_net = source.read_network_counters().ok().map(CounterSnapshot::now);
        Self {
            source,
            plots: PlotState::new(),
            prev_net,
            ticks_since_net: 0,
            state: LoopState::Running,
            stats: LoopStats::default(),
            period: TICK,
            regression: cfg.regression,
            marker: cfg.marker.symbol(),
            // Per-tick events only go to a log file; stderr would tear the display.
            log_ticks: cfg.log_file.is_some(),
        }
    }

    /// Override the tick period (tests drive the loop faster than 1 Hz).
    /// Raised to `MIN_PERIOD` if shorter.
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period.max(MIN_PERIOD);
        self
    }

    pub fn plots(&self) -> &PlotState {
        &self.plots
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    pub fn previous_snapshot(&self) -> Option<&CounterSnapshot> {
        self.prev_net.as_ref()
    }

    /// Sets up the terminal, runs the loop until quit, and always restores the terminal.
    pub async fn run(&mut self) -> Result<()> {
        let terminal = setup_terminal().map_err(Error::Init)?;
        let view = View {
            hostname: self.source.host_name(),
            marker: self.marker,
        };
        let mut renderer = TerminalRenderer::new(terminal, view);
        let mut events = EventStream::new();

        let res = self.event_loop(&mut renderer, &mut events).await;

        restore_terminal(renderer.terminal_mut())?;
        res
    }

    /// Initial render, then one tick or one input event at a time until a quit key.
    pub async fn event_loop<R, E>(&mut self, renderer: &mut R, events: &mut E) -> Result<()>
    where
        R: Renderer,
        E: Stream<Item = io::Result<Event>> + Unpin,
    {
        renderer.draw(&self.plots)?;

        // First tick one period after entry; a slow tick pushes the next one back.
        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while self.state == LoopState::Running {
            // A due tick is handled before input that became ready in the same poll.
            tokio::select! {
                biased;
                _ = ticker.tick() => {
                    self.on_tick();
                    renderer.draw(&self.plots)?;
                }
                ev = events.next() => match ev {
                    Some(Ok(ev)) => self.handle_event(&ev),
                    Some(Err(e)) => return Err(Error::Input(e)),
                    None => self.state = LoopState::Terminated,
                },
            }
        }
        Ok(())
    }

    /// One sampling cycle: read, derive rates, push into every series.
    pub fn on_tick(&mut self) -> TickReport {
        let cpu = Reading::from(self.source.read_cpu());
        let memory = Reading::from(self.source.read_memory());
        let (net_sent, net_recv) = self.sample_network();

        let report = TickReport {
            cpu,
            memory,
            net_sent,
            net_recv,
        };
        self.plots.apply(&report);

        self.stats.ticks += 1;
        self.stats.stale_reads += report.stale_count() as u64;
        if self.log_ticks && report.stale_count() > 0 {
            debug!(tick = self.stats.ticks, ?report, "stale readings this tick");
        }
        report
    }

    fn sample_network(&mut self) -> (Reading, Reading) {
        self.ticks_since_net = self.ticks_since_net.saturating_add(1);
        let counters = match self.source.read_network_counters() {
            Ok(c) => c,
            Err(_) => return (Reading::Stale, Reading::Stale),
        };
        let curr = CounterSnapshot::now(counters);
        let Some(prev) = self.prev_net.replace(curr) else {
            // First good read becomes the baseline
            self.ticks_since_net = 0;
            return (Reading::Stale, Reading::Stale);
        };

        let elapsed = self.period.as_secs_f64() * f64::from(self.ticks_since_net);
        self.ticks_since_net = 0;

        let (p, c) = (prev.counters, curr.counters);
        if c.sent < p.sent || c.received < p.received {
            self.stats.regressions += 1;
            if self.log_ticks {
                debug!(?p, ?c, policy = %self.regression, "network counter went backwards");
            }
        }
        (
            Reading::Fresh(kb_per_sec(p.sent, c.sent, elapsed, self.regression)),
            Reading::Fresh(kb_per_sec(p.received, c.received, elapsed, self.regression)),
        )
    }

    pub fn handle_event(&mut self, ev: &Event) {
        if let Event::Key(k) = ev {
            if is_quit_key(k) {
                self.state = LoopState::Terminated;
            }
        }
    }
}

/// `q` or Ctrl-C, on key press only.
pub fn is_quit_key(k: &KeyEvent) -> bool {
    if k.kind != KeyEventKind::Press {
        return false;
    }
    match k.code {
        KeyCode::Char('q') => !k.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('c') => k.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    let entered = execute!(stdout, EnterAlternateScreen).and_then(|_| {
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.clear()?;
        Ok(terminal)
    });
    if entered.is_err() {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
    entered
}

fn restore_terminal<B: ratatui::backend::Backend + io::Write>(
    terminal: &mut Terminal<B>,
) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
