//! User-facing terminal output for `fsx`.
//!
//! Primary results (listings, sizes, records) go to stdout uncolored so they
//! can be piped. Status lines get a colored prefix when the target stream is a
//! terminal.

use owo_colors::OwoColorize;

fn stdout_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn stderr_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

pub fn print_info(msg: &str) {
    if stdout_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {msg}");
    }
}

pub fn print_warn(msg: &str) {
    if stderr_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {msg}");
    }
}

/// Error line on stderr, with the numeric error code when there is one.
pub fn print_error(msg: &str, code: Option<i32>) {
    let prefix = match code {
        Some(c) => format!("error[{c}]:"),
        None => "error:".to_string(),
    };
    if stderr_tty() {
        eprintln!("{} {}", prefix.red().bold(), msg);
    } else {
        eprintln!("{prefix} {msg}");
    }
}

pub fn print_success(msg: &str) {
    if stdout_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {msg}");
    }
}

/// Plain line, no prefix. Scriptable output.
pub fn print_user(msg: &str) {
    println!("{msg}");
}

/// One `ls` line: `d <name>` or `f <name>`, directories blue on a terminal.
pub fn print_entry(name: &str, is_dir: bool) {
    match (is_dir, stdout_tty()) {
        (true, true) => println!("d {}", name.blue().bold()),
        (true, false) => println!("d {name}"),
        (false, _) => println!("f {name}"),
    }
}

/// Aligned `label: value` line used by `stat`.
pub fn print_field(label: &str, value: &str) {
    if stdout_tty() {
        println!("{:>10} {}", format!("{label}:").dimmed(), value);
    } else {
        println!("{:>10} {}", format!("{label}:"), value);
    }
}
