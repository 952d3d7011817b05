//! CLI definition and parsing.
//! Defines Args/Command and provides parse() for command-line handling.
//!
//! Notes:
//! - --debug is a shorthand for --log-level debug.
//! - Flags left unset fall back to the XML config, then to built-in defaults.

use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel, parse_octal_mode};
use crate::directory::SizeMode;

/// Filesystem operations on files and directory trees.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Inspect, copy, move and remove files and directory trees")]
pub struct Args {
    /// Explicit config file (otherwise $FSX_CONFIG or the per-user default).
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also write logs to this file.
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Print the config file location used by fsx and exit.
    #[arg(long)]
    pub print_config: bool,

    /// Write a template config file to the default location and exit.
    #[arg(long)]
    pub init_config: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the immediate children of a directory.
    Ls {
        #[arg(value_hint = ValueHint::DirPath)]
        dir: PathBuf,
    },
    /// Show size, permissions, ownership, times and MIME type of a file.
    Stat {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },
    /// Aggregate size of a directory tree.
    Size {
        #[arg(value_hint = ValueHint::DirPath)]
        dir: PathBuf,
        /// Count only file bytes, not directory entries.
        #[arg(long)]
        files_only: bool,
    },
    /// Copy a file or a directory tree.
    Cp {
        #[arg(value_hint = ValueHint::AnyPath)]
        src: PathBuf,
        #[arg(value_hint = ValueHint::AnyPath)]
        dest: PathBuf,
        /// Fail instead of replacing existing destination files.
        #[arg(long)]
        no_overwrite: bool,
    },
    /// Move a file or a directory tree (copy, then delete the source).
    Mv {
        #[arg(value_hint = ValueHint::AnyPath)]
        src: PathBuf,
        #[arg(value_hint = ValueHint::AnyPath)]
        dest: PathBuf,
        #[arg(long)]
        no_overwrite: bool,
    },
    /// Delete a file or a directory tree.
    Rm {
        #[arg(value_hint = ValueHint::AnyPath)]
        path: PathBuf,
    },
    /// Remove everything below a directory, keeping the directory.
    Empty {
        #[arg(value_hint = ValueHint::DirPath)]
        dir: PathBuf,
    },
    /// Create a directory and any missing ancestors.
    Mkdir {
        #[arg(value_hint = ValueHint::DirPath)]
        dir: PathBuf,
        /// Octal mode (default from config, 755).
        #[arg(long, value_parser = parse_octal_mode)]
        mode: Option<u32>,
    },
    /// Set modified/access times, creating the file if needed.
    Touch {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Modified time, seconds since the Unix epoch (default: now).
        #[arg(long)]
        mtime: Option<u64>,
        /// Access time, seconds since the Unix epoch (default: the modified time).
        #[arg(long)]
        atime: Option<u64>,
    },
    /// Change permission bits of a file.
    Chmod {
        #[arg(value_parser = parse_octal_mode)]
        mode: u32,
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },
    /// Print every delimited record of a file, fields joined by tabs.
    Csv {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Field separator (single ASCII character).
        #[arg(long, default_value_t = ',')]
        separator: char,
    },
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(p) = &self.log_file {
            cfg.log_file = Some(p.clone());
        }
        if self.json {
            cfg.json_logs = true;
        }
        match &self.command {
            Some(Command::Cp { no_overwrite: true, .. }) | Some(Command::Mv { no_overwrite: true, .. }) => {
                cfg.overwrite = false;
            }
            Some(Command::Size { files_only: true, .. }) => {
                cfg.size_mode = SizeMode::FilesOnly;
            }
            Some(Command::Mkdir { mode: Some(m), .. }) => {
                cfg.dir_mode = *m;
            }
            _ => {}
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
