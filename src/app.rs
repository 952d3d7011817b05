//! Application orchestrator.
//! Loads/merges config, initializes logging, dispatches the subcommand to the
//! library and maps failures onto exit codes.

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, Local};
use std::path::Path;
use std::process::ExitCode;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, error, info};

use fs_facade::cli::{Args, Command};
use fs_facade::config::{create_template_config, load_config};
use fs_facade::output as out;
use fs_facade::{Config, Dialect, DirectoryNode, FileHandle, FsError, default_config_path};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> ExitCode {
    // --print-config / --init-config run before logging init
    if args.print_config {
        return print_config_location(&args);
    }
    if args.init_config {
        return init_config(&args);
    }

    let Some(command) = args.command.clone() else {
        out::print_error("no command given (see --help)", None);
        return ExitCode::from(2);
    };

    let (mut cfg, cfg_path) = match load_config(args.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            out::print_error(&format!("{e:#}"), None);
            return ExitCode::FAILURE;
        }
    };
    args.apply_overrides(&mut cfg);

    let guard = match init_tracing(&cfg.log_level, cfg.log_file.as_deref(), cfg.json_logs) {
        Ok(g) => g,
        Err(e) => {
            out::print_error(&format!("failed to initialize logging: {e:#}"), None);
            return ExitCode::FAILURE;
        }
    };

    match &cfg_path {
        Some(p) => debug!(config = %p.display(), "loaded config"),
        None => debug!("using built-in defaults"),
    }
    debug!(?command, ?cfg, "starting fsx");

    let code = match execute(&command, &cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report_failure(&e),
    };

    // Flush the file appender before exit
    drop(guard);
    code
}

fn report_failure(e: &anyhow::Error) -> ExitCode {
    match e.chain().find_map(|c| c.downcast_ref::<FsError>()) {
        Some(fs_err) => {
            let code = fs_err.code();
            error!(code, kind = ?fs_err.io_kind(), "{e:#}");
            out::print_error(&format!("{e:#}"), Some(code));
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
        None => {
            error!("{e:#}");
            out::print_error(&format!("{e:#}"), None);
            ExitCode::FAILURE
        }
    }
}

fn print_config_location(args: &Args) -> ExitCode {
    let path = match args.config.clone().or_else(default_config_path) {
        Some(p) => p,
        None => {
            out::print_error("could not determine a config path", None);
            return ExitCode::FAILURE;
        }
    };
    out::print_user(&path.display().to_string());
    if path.is_file() {
        out::print_info("a config file exists at that location");
    } else {
        out::print_info("no config file there yet; built-in defaults apply (create one with --init-config)");
    }
    ExitCode::SUCCESS
}

fn init_config(args: &Args) -> ExitCode {
    let Some(path) = args.config.clone().or_else(default_config_path) else {
        out::print_error("could not determine a config path", None);
        return ExitCode::FAILURE;
    };
    match create_template_config(&path) {
        Ok(()) => {
            out::print_success(&format!("template config written to {}", path.display()));
            ExitCode::SUCCESS
        }
        Err(e) => {
            out::print_error(&format!("{e:#}"), None);
            ExitCode::FAILURE
        }
    }
}

fn execute(command: &Command, cfg: &Config) -> Result<()> {
    match command {
        Command::Ls { dir } => {
            let node = DirectoryNode::new(dir);
            for entry in node.contents()? {
                let name = fs_facade::path::base_name(entry.path());
                out::print_entry(&name, entry.is_dir());
            }
        }
        Command::Stat { file } => stat(&FileHandle::new(file))?,
        Command::Size { dir, .. } => {
            let total = DirectoryNode::new(dir).size_with(cfg.size_mode)?;
            out::print_user(&total.to_string());
        }
        Command::Cp { src, dest, .. } => {
            let copied = copy_any(src, dest, cfg.overwrite)?;
            out::print_success(&format!("copied {} -> {}", src.display(), copied.display()));
        }
        Command::Mv { src, dest, .. } => {
            let moved = if src.is_dir() {
                DirectoryNode::new(src)
                    .move_to(dest, cfg.overwrite)?
                    .path()
                    .to_path_buf()
            } else {
                let file = FileHandle::new(src);
                let target = file.copy(dest, cfg.overwrite)?;
                file.delete()?;
                info!(src = %file.path().display(), dest = %target.path().display(), "Moved file");
                target.path().to_path_buf()
            };
            out::print_success(&format!("moved {} -> {}", src.display(), moved.display()));
        }
        Command::Rm { path } => {
            if path.is_dir() {
                DirectoryNode::new(path).delete()?;
            } else {
                FileHandle::new(path).delete()?;
            }
            out::print_success(&format!("removed {}", path.display()));
        }
        Command::Empty { dir } => {
            DirectoryNode::new(dir).empty()?;
            out::print_success(&format!("emptied {}", dir.display()));
        }
        Command::Mkdir { dir, .. } => {
            let node = DirectoryNode::new(dir);
            node.create(cfg.dir_mode)?;
            out::print_success(&format!("created {}", node.path().display()));
        }
        Command::Touch { file, mtime, atime } => {
            FileHandle::new(file).touch(mtime.map(epoch_secs), atime.map(epoch_secs))?;
        }
        Command::Chmod { mode, file } => {
            FileHandle::new(file).chmod(*mode)?;
        }
        Command::Csv { file, separator } => {
            let sep = u8::try_from(*separator)
                .ok()
                .filter(u8::is_ascii)
                .ok_or_else(|| anyhow!("separator must be a single ASCII character, got '{separator}'"))?;
            print_records(file, Dialect::default().with_separator(sep))?;
        }
    }
    Ok(())
}

fn copy_any(src: &Path, dest: &Path, overwrite: bool) -> Result<std::path::PathBuf> {
    if src.is_dir() {
        let copied = DirectoryNode::new(src).copy(dest, overwrite)?;
        Ok(copied.path().to_path_buf())
    } else {
        let copied = FileHandle::new(src).copy(dest, overwrite)?;
        Ok(copied.path().to_path_buf())
    }
}

fn stat(file: &FileHandle) -> Result<()> {
    let size = file.size()?;
    out::print_field("path", &file.path().display().to_string());
    out::print_field("size", &size.to_string());
    out::print_field("mode", &file.permissions()?);
    #[cfg(unix)]
    {
        out::print_field("owner", &file.owner()?.to_string());
        out::print_field("group", &file.group()?.to_string());
    }
    out::print_field("modified", &local_time(file.modified_time()?));
    out::print_field("accessed", &local_time(file.access_time()?));
    out::print_field("mime", &file.mime_type()?);
    Ok(())
}

fn print_records(path: &Path, dialect: Dialect) -> Result<()> {
    let mut file = FileHandle::new(path);
    file.open("r")
        .with_context(|| format!("open '{}' for reading records", path.display()))?;
    let mut count = 0usize;
    loop {
        match file.read_delimited(dialect) {
            Ok(fields) => {
                out::print_user(&fields.join("\t"));
                count += 1;
            }
            Err(FsError::EndOfFile(_)) => break,
            Err(e) => bail!(e),
        }
    }
    file.close()?;
    debug!(path = %path.display(), records = count, "read delimited records");
    Ok(())
}

fn epoch_secs(secs: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs)
}

fn local_time(t: SystemTime) -> String {
    DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M:%S").to_string()
}
