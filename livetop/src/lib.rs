//! livetop: live CPU, RAM and network I/O plots in the terminal.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod metrics;
pub mod plots;
pub mod rate;
pub mod types;
pub mod ui;
