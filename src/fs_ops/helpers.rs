//! OS error helpers.
//!
//! Turns a raw io::Error into an `FsError::Os` whose message names the operation,
//! the path, the OS text and (when we recognise the code) a short actionable hint.
//!
//! Usage:
//!   fs::remove_file(p).map_err(os_error("remove file", p))?;

use std::io;
use std::path::Path;

use crate::errors::FsError;

/// Short hint for a raw OS error code, if we have one.
fn hint_for_code(code: i32) -> Option<&'static str> {
    #[cfg(unix)]
    {
        match code {
            libc::EACCES | libc::EPERM => Some("permission denied; check ownership and mode bits"),
            libc::ENOENT => Some("path not found; verify it exists"),
            libc::EEXIST => Some("already exists"),
            libc::ENOTEMPTY => Some("directory not empty"),
            libc::ENOTDIR => Some("a path component is not a directory"),
            libc::EISDIR => Some("path is a directory"),
            libc::EBADF => Some("handle not opened for this kind of access"),
            libc::EBUSY => Some("resource busy"),
            libc::ENOSPC => Some("insufficient space on device"),
            libc::EROFS => Some("read-only filesystem"),
            libc::ELOOP => Some("too many symbolic link levels; possible symlink cycle"),
            libc::ENAMETOOLONG => Some("filename or path too long"),
            libc::EMFILE => Some("process file descriptor limit reached"),
            libc::ENFILE => Some("system-wide file table overflow"),
            _ => None,
        }
    }
    #[cfg(windows)]
    {
        match code {
            5 => Some("access denied; check permissions"),
            2 | 3 => Some("path not found; verify it exists"),
            32 => Some("sharing violation; file is in use"),
            33 => Some("region is locked by another process"),
            80 | 183 => Some("already exists"),
            145 => Some("directory not empty"),
            112 => Some("insufficient disk space"),
            206 => Some("filename or path too long"),
            _ => None,
        }
    }
    #[cfg(not(any(unix, windows)))]
    {
        let _ = code;
        None
    }
}

/// Hint derived from the error kind when no raw OS code is available.
fn hint_for_kind(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and mode bits"),
        io::ErrorKind::NotFound => Some("path not found; verify it exists"),
        io::ErrorKind::AlreadyExists => Some("already exists"),
        io::ErrorKind::WouldBlock => Some("lock is held elsewhere"),
        io::ErrorKind::UnexpectedEof => Some("unexpected end of file"),
        _ => None,
    }
}

/// Format "<op> '<path>': <os text>[ — hint][ [os code: N]]".
pub(crate) fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    match e.raw_os_error() {
        Some(code) => {
            if let Some(hint) = hint_for_code(code) {
                msg.push_str(" — ");
                msg.push_str(hint);
            }
            msg.push_str(&format!(" [os code: {}]", code));
        }
        None => {
            if let Some(hint) = hint_for_kind(e.kind()) {
                msg.push_str(" — ");
                msg.push_str(hint);
            }
        }
    }

    msg
}

/// Adapter for `.map_err(...)`: io::Error -> FsError::Os with op/path context.
pub fn os_error<'a>(op: &'a str, path: &'a Path) -> impl FnOnce(io::Error) -> FsError + 'a {
    move |e: io::Error| FsError::os(op, path, e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_op_and_path() {
        let p = Path::new("/nonexistent/thing.txt");
        let err = os_error("open file", p)(io::Error::from(io::ErrorKind::NotFound));
        let msg = err.to_string();
        assert!(msg.starts_with("open file '/nonexistent/thing.txt'"), "msg was: {msg}");
        assert!(msg.contains("path not found"));
    }

    #[cfg(unix)]
    #[test]
    fn raw_code_adds_hint_and_code() {
        let p = Path::new("/tmp/x");
        let err = os_error("remove directory", p)(io::Error::from_raw_os_error(libc::ENOTEMPTY));
        let msg = err.to_string();
        assert!(msg.contains("directory not empty"), "msg was: {msg}");
        assert!(msg.contains(&format!("[os code: {}]", libc::ENOTEMPTY)));
    }

    #[cfg(unix)]
    #[test]
    fn bad_descriptor_hint() {
        let msg = build_message("read", Path::new("/tmp/x"), &io::Error::from_raw_os_error(libc::EBADF));
        assert!(msg.contains("not opened for this kind of access"), "msg was: {msg}");
    }

    #[test]
    fn unknown_kind_has_no_hint() {
        let e = io::Error::other("boom");
        let msg = build_message("op", Path::new("/p"), &e);
        assert_eq!(msg, "op '/p': boom");
    }
}
