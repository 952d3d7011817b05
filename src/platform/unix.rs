//! Unix implementations of platform helpers.

use std::ffi::CString;
use std::fs::{self, DirBuilder, File, OpenOptions};
use std::io;
use std::os::fd::IntoRawFd;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::{DirBuilderExt, MetadataExt, OpenOptionsExt, PermissionsExt};
use std::path::Path;

/// Permission bits (rwx for user/group/other) of already-fetched metadata.
pub fn mode_bits(meta: &fs::Metadata) -> u32 {
    meta.permissions().mode() & 0o777
}

/// chmod(2).
pub fn set_mode(path: &Path, mode: u32) -> io::Result<()> {
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

/// mkdir -p with `mode` applied (subject to umask) to every directory created.
pub fn create_dir_all(path: &Path, mode: u32) -> io::Result<()> {
    DirBuilder::new().recursive(true).mode(mode).create(path)
}

pub fn owner(meta: &fs::Metadata) -> u32 {
    meta.uid()
}

pub fn group(meta: &fs::Metadata) -> u32 {
    meta.gid()
}

fn access(path: &Path, how: libc::c_int) -> bool {
    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    unsafe { libc::access(c_path.as_ptr(), how) == 0 }
}

pub fn can_read(path: &Path) -> bool {
    access(path, libc::R_OK)
}

pub fn can_write(path: &Path) -> bool {
    access(path, libc::W_OK)
}

pub fn can_execute(path: &Path) -> bool {
    access(path, libc::X_OK)
}

/// close(2) with its result reported. The descriptor is released either way.
pub fn close_file(file: File) -> io::Result<()> {
    let fd = file.into_raw_fd();
    if unsafe { libc::close(fd) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// Open log file for appending; set 0600 only when creating a new file.
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .mode(0o600)
        .open(path)
}

/// Create `path` exclusively with mode 0600 from the start.
pub fn create_private_new(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(path)
}
