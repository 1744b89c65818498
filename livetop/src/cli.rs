//! Command-line parsing. Flags override the config file for this run; `--save` persists them.

use std::path::PathBuf;

use crate::config::{Config, MarkerStyle};
use crate::rate::RegressionPolicy;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    pub config: Option<PathBuf>,
    pub regression: Option<RegressionPolicy>,
    pub marker: Option<MarkerStyle>,
    pub log_file: Option<PathBuf>,
    pub save: bool,
    pub dry_run: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ArgsError {
    /// `--help` was requested; carries the usage text.
    Help(String),
    Invalid(String),
}

pub fn usage(prog: &str) -> String {
    format!(
        "Usage: {prog} [--config PATH|-c PATH] [--regression pass-through|clamp] \
         [--marker NAME|-m NAME] [--log-file PATH] [--save] [--dry-run]\n\
         \n  Plots CPU, RAM and network I/O once per second. Press 'q' or Ctrl-C to quit.\n\
         \n  --marker      braille (default), dot, block, bar, half-block\
         \n  --regression  how a network counter going backwards is shown (default pass-through)\
         \n  --save        write the effective settings back to the config file\
         \n  --dry-run     print the effective settings as JSON and exit"
    )
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ParsedArgs, ArgsError> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "livetop".into());
    let mut parsed = ParsedArgs::default();

    let invalid = |msg: String| ArgsError::Invalid(format!("{msg}\n{}", usage(&prog)));

    while let Some(arg) = it.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((f, v)) if f.starts_with("--") => (f.to_string(), Some(v.to_string())),
            _ => (arg.clone(), None),
        };
        let mut value = |name: &str| -> Result<String, ArgsError> {
            match inline.clone().or_else(|| it.next()) {
                Some(v) if !v.is_empty() => Ok(v),
                _ => Err(invalid(format!("{name} requires a value"))),
            }
        };
        if inline.is_some() && matches!(flag.as_str(), "--help" | "--save" | "--dry-run") {
            return Err(invalid(format!("{flag} does not take a value")));
        }
        match flag.as_str() {
            "-h" | "--help" => return Err(ArgsError::Help(usage(&prog))),
            "-c" | "--config" => parsed.config = Some(PathBuf::from(value("--config")?)),
            "--regression" => {
                let v = value("--regression")?;
                parsed.regression = Some(v.parse::<RegressionPolicy>().map_err(invalid)?);
            }
            "-m" | "--marker" => {
                let v = value("--marker")?;
                parsed.marker = Some(v.parse::<MarkerStyle>().map_err(invalid)?);
            }
            "--log-file" => parsed.log_file = Some(PathBuf::from(value("--log-file")?)),
            "--save" => parsed.save = true,
            "--dry-run" => parsed.dry_run = true,
            _ => return Err(invalid(format!("Unexpected argument '{arg}'"))),
        }
    }
    Ok(parsed)
}

impl ParsedArgs {
    /// Layer the flags given on the command line over `cfg`.
    pub fn apply(&self, cfg: &mut Config) {
        if let Some(r) = self.regression {
            cfg.regression = r;
        }
        if let Some(m) = self.marker {
            cfg.marker = m;
        }
        if let Some(p) = &self.log_file {
            cfg.log_file = Some(p.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<ParsedArgs, ArgsError> {
        parse_args(std::iter::once("livetop").chain(args.iter().copied()).map(String::from))
    }

    #[test]
    fn no_args_is_all_defaults() {
        assert_eq!(parse(&[]), Ok(ParsedArgs::default()));
    }

    #[test]
    fn long_short_and_assign_forms() {
        let p = parse(&["-c", "/tmp/a.json", "--marker=dot", "--regression", "clamp"]).unwrap();
        assert_eq!(p.config, Some(PathBuf::from("/tmp/a.json")));
        assert_eq!(p.marker, Some(MarkerStyle::Dot));
        assert_eq!(p.regression, Some(RegressionPolicy::Clamp));

        let p = parse(&["--config=/tmp/b.json", "-m", "block", "--save", "--dry-run"]).unwrap();
        assert_eq!(p.config, Some(PathBuf::from("/tmp/b.json")));
        assert_eq!(p.marker, Some(MarkerStyle::Block));
        assert!(p.save && p.dry_run);
    }

    #[test]
    fn help_wins_even_after_other_flags() {
        match parse(&["--marker", "dot", "--help"]) {
            Err(ArgsError::Help(text)) => assert!(text.contains("Usage:")),
            other => panic!("expected help, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_and_incomplete() {
        assert!(matches!(parse(&["--bogus"]), Err(ArgsError::Invalid(_))));
        assert!(matches!(parse(&["/tmp/a.json"]), Err(ArgsError::Invalid(_))));
        assert!(matches!(parse(&["--marker"]), Err(ArgsError::Invalid(_))));
        assert!(matches!(parse(&["--marker="]), Err(ArgsError::Invalid(_))));
        match parse(&["--regression", "zero"]) {
            Err(ArgsError::Invalid(msg)) => assert!(msg.contains("zero")),
            other => panic!("expected invalid, got {other:?}"),
        }
    }

    #[test]
    fn rejects_value_on_boolean_flags() {
        for arg in ["--save=false", "--dry-run=no", "--help=1", "--save="] {
            match parse(&[arg]) {
                Err(ArgsError::Invalid(msg)) => {
                    assert!(msg.contains("does not take a value"), "{arg}: {msg}")
                }
                other => panic!("{arg}: expected invalid, got {other:?}"),
            }
        }
        // Nothing is saved when the value form comes after valid flags
        assert!(matches!(
            parse(&["--marker", "dot", "--save=false"]),
            Err(ArgsError::Invalid(_))
        ));
    }

    #[test]
    fn apply_only_overrides_given_flags() {
        let mut cfg = Config {
            regression: RegressionPolicy::Clamp,
            marker: MarkerStyle::Bar,
            log_file: None,
            version: 3,
        };
        parse(&["--marker", "dot"]).unwrap().apply(&mut cfg);
        assert_eq!(cfg.marker, MarkerStyle::Dot);
        assert_eq!(cfg.regression, RegressionPolicy::Clamp);
        assert_eq!(cfg.version, 3);
    }
}
