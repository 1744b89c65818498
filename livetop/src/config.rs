//! User config: JSON file with the regression policy, plot marker and log file.
//! Stored under XDG config dir: $XDG_CONFIG_HOME/livetop/config.json (fallback ~/.config/livetop/config.json)

use serde::{Deserialize, Serialize};
use std::{
    fmt, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::error::{Error, Result};
use crate::rate::RegressionPolicy;

/// Glyphs used to draw plot lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerStyle {
    #[default]
    Braille,
    Dot,
    Block,
    Bar,
    HalfBlock,
}

impl MarkerStyle {
    pub fn symbol(self) -> ratatui::symbols::Marker {
        use ratatui::symbols::Marker;
        match self {
            Self::Braille => Marker::Braille,
            Self::Dot => Marker::Dot,
            Self::Block => Marker::Block,
            Self::Bar => Marker::Bar,
            Self::HalfBlock => Marker::HalfBlock,
        }
    }
}

impl FromStr for MarkerStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "braille" => Ok(Self::Braille),
            "dot" => Ok(Self::Dot),
            "block" => Ok(Self::Block),
            "bar" => Ok(Self::Bar),
            "half_block" | "halfblock" => Ok(Self::HalfBlock),
            other => Err(format!(
                "unknown marker '{other}' (expected braille, dot, block, bar or half-block)"
            )),
        }
    }
}

impl fmt::Display for MarkerStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Braille => "braille",
            Self::Dot => "dot",
            Self::Block => "block",
            Self::Bar => "bar",
            Self::HalfBlock => "half-block",
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub regression: RegressionPolicy,
    #[serde(default)]
    pub marker: MarkerStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Schema version of the file; 0 for files never written by livetop.
    #[serde(default)]
    pub version: u32,
}

/// Written into every saved file.
pub const CONFIG_VERSION: u32 = 1;

pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("livetop")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("livetop")
    }
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

/// A missing file yields the defaults; a file that exists but doesn't parse is an error.
pub fn load_config(path: &Path) -> Result<Config> {
    match fs::read_to_string(path) {
        Ok(s) => serde_json::from_str(&s).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Config::default()),
        Err(source) => Err(Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Writes `cfg` stamped with the current `CONFIG_VERSION`.
pub fn save_config(path: &Path, cfg: &Config) -> Result<()> {
    let stamped = Config {
        version: CONFIG_VERSION,
        ..cfg.clone()
    };
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(&stamped)?;
        fs::write(path, data)
    };
    write().map_err(|source| Error::ConfigIo {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let td = tempfile::tempdir().unwrap();
        let cfg = load_config(&td.path().join("nope.json")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.regression, RegressionPolicy::PassThrough);
        assert_eq!(cfg.marker, MarkerStyle::Braille);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let td = tempfile::tempdir().unwrap();
        let path = td.path().join("config.json");
        fs::write(&path, r#"{ "regression": "clamp" }"#).unwrap();
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.regression, RegressionPolicy::Clamp);
        assert_eq!(cfg.marker, MarkerStyle::Braille);
        assert!(cfg.log_file.is_none());
    }

    #[test]
    fn garbage_is_reported_with_path() {
        let td = tempfile::tempdir().unwrap();
        let path = td.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("config.json"), "{err}");
    }

    #[test]
    fn save_then_load_creates_parent_dirs() {
        let td = tempfile::tempdir().unwrap();
        let path = td.path().join("nested").join("livetop").join("config.json");
        let cfg = Config {
            regression: RegressionPolicy::Clamp,
            marker: MarkerStyle::HalfBlock,
            log_file: Some(PathBuf::from("/tmp/livetop.log")),
            version: CONFIG_VERSION,
        };
        save_config(&path, &cfg).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"half_block\""), "{text}");
        assert_eq!(load_config(&path).unwrap(), cfg);
    }

    #[test]
    fn save_stamps_current_version() {
        let td = tempfile::tempdir().unwrap();
        let path = td.path().join("config.json");
        fs::write(&path, r#"{ "marker": "dot" }"#).unwrap();
        let old = load_config(&path).unwrap();
        assert_eq!(old.version, 0);

        save_config(&path, &old).unwrap();
        let saved = load_config(&path).unwrap();
        assert_eq!(saved.version, CONFIG_VERSION);
        assert_eq!(saved.marker, MarkerStyle::Dot);
    }

    #[test]
    fn marker_names_parse() {
        assert_eq!("dot".parse::<MarkerStyle>(), Ok(MarkerStyle::Dot));
        assert_eq!("half-block".parse::<MarkerStyle>(), Ok(MarkerStyle::HalfBlock));
        assert!("sparkle".parse::<MarkerStyle>().is_err());
    }
}
