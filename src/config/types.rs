//! Settings for the `fsx` front end: verbosity, log sinks, and the defaults
//! applied to mkdir/size/cp/mv.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::directory::{DEFAULT_DIR_MODE, SizeMode};

/// Verbosity accepted by `--log-level` and `<log_level>`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// errors only
    Quiet,
    /// completed tree operations
    #[default]
    Normal,
    /// plus single-file mutations
    Info,
    /// plus per-entry walk steps and lock transitions
    Debug,
}

impl LogLevel {
    /// Case-insensitive; a few aliases (`error`, `verbose`, `trace`, ...) are accepted.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Parse an octal permission string such as "755" or "0o700".
pub fn parse_octal_mode(s: &str) -> Result<u32, String> {
    let t = s.trim();
    let digits = t.strip_prefix("0o").unwrap_or(t);
    match u32::from_str_radix(digits, 8) {
        Ok(mode) if mode <= 0o7777 => Ok(mode),
        _ => Err(format!("invalid octal mode: '{s}'")),
    }
}

/// Runtime configuration for `fsx`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Console and file verbosity
    pub log_level: LogLevel,
    /// Extra log sink next to stderr
    pub log_file: Option<PathBuf>,
    /// Emit structured JSON log lines
    pub json_logs: bool,
    /// Mode for directories created by `mkdir`
    pub dir_mode: u32,
    /// What `size` adds up
    pub size_mode: SizeMode,
    /// Whether `cp`/`mv` replace existing destination files
    pub overwrite: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Normal,
            log_file: None,
            json_logs: false,
            dir_mode: DEFAULT_DIR_MODE,
            size_mode: SizeMode::Entries,
            overwrite: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn octal_modes() {
        assert_eq!(parse_octal_mode("755"), Ok(0o755));
        assert_eq!(parse_octal_mode("0o700"), Ok(0o700));
        assert_eq!(parse_octal_mode(" 0644 "), Ok(0o644));
        assert!(parse_octal_mode("789").is_err());
        assert!(parse_octal_mode("77777").is_err());
    }

    #[test]
    fn log_level_names() {
        assert_eq!("Trace".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert_eq!(LogLevel::parse(" none "), Some(LogLevel::Quiet));
        assert_eq!(LogLevel::Info.to_string(), "info");
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.dir_mode, 0o755);
        assert_eq!(cfg.size_mode, SizeMode::Entries);
        assert!(cfg.overwrite);
        assert!(cfg.log_file.is_none());
    }
}
