//! Non-Unix implementations of platform helpers.
//!
//! Notes:
//! - There are no POSIX mode bits; the owner-write bit maps onto the READONLY attribute.
//! - Ownership ids are not exposed (the FileHandle owner/group accessors are Unix-only).

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

/// Synthesized mode: 0o444 for read-only entries, 0o666 otherwise (plus x for directories).
pub fn mode_bits(meta: &fs::Metadata) -> u32 {
    let base = if meta.permissions().readonly() { 0o444 } else { 0o666 };
    if meta.is_dir() { base | 0o111 } else { base }
}

/// Toggle READONLY from the owner-write bit.
pub fn set_mode(path: &Path, mode: u32) -> io::Result<()> {
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_readonly(mode & 0o200 == 0);
    fs::set_permissions(path, perms)
}

/// mkdir -p; the mode is not applicable here.
pub fn create_dir_all(path: &Path, _mode: u32) -> io::Result<()> {
    fs::create_dir_all(path)
}

pub fn can_read(path: &Path) -> bool {
    if path.is_dir() {
        return fs::read_dir(path).is_ok();
    }
    File::open(path).is_ok()
}

pub fn can_write(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| !m.permissions().readonly())
        .unwrap_or(false)
}

pub fn can_execute(path: &Path) -> bool {
    let exe = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e.to_ascii_lowercase().as_str(), "exe" | "com" | "bat" | "cmd"))
        .unwrap_or(false);
    exe && path.is_file()
}

/// Handles have no separate close result via std; dropping releases them.
pub fn close_file(file: File) -> io::Result<()> {
    drop(file);
    Ok(())
}

/// Open log file for appending (no symlink defense available via std here).
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    OpenOptions::new().create(true).append(true).open(path)
}

pub fn create_private_new(path: &Path) -> io::Result<File> {
    OpenOptions::new().write(true).create_new(true).open(path)
}
