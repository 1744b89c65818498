//! Error types for startup, the terminal and metric reads.

use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to initialize terminal")]
    Init(#[source] io::Error),

    #[error("terminal I/O failed")]
    Terminal(#[from] io::Error),

    #[error("reading terminal input failed")]
    Input(#[source] io::Error),

    #[error("invalid config file {}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not access config file {}", .path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A single metric read failed for one tick. Always recovered locally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricReadError {
    #[error("metric collection is not supported on this platform")]
    Unsupported,

    #[error("{0} unavailable")]
    Unavailable(&'static str),
}
