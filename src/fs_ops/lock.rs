//! Advisory locks on an open handle.
//!
//! Pass-through to flock(2) on Unix and LockFileEx on Windows via `fs2`. Locks only
//! constrain other processes that lock the same file; plain reads and writes are not
//! blocked. Calls go through `fs2::FileExt` explicitly so newer std `File::lock*`
//! inherent methods never shadow them.

use fs2::FileExt;
use std::fs::File;
use std::io;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockMode {
    /// Many holders at once (LOCK_SH).
    #[default]
    Shared,
    /// Single holder (LOCK_EX).
    Exclusive,
    /// Release whatever lock this handle holds (LOCK_UN).
    Unlock,
}

/// Blocking lock/unlock.
pub(crate) fn apply(file: &File, mode: LockMode) -> io::Result<()> {
    match mode {
        LockMode::Shared => FileExt::lock_shared(file)?,
        LockMode::Exclusive => FileExt::lock_exclusive(file)?,
        LockMode::Unlock => FileExt::unlock(file)?,
    }
    trace!(?mode, "lock applied");
    Ok(())
}

/// Non-blocking attempt. Ok(false) when another holder makes the request contended.
pub(crate) fn try_apply(file: &File, mode: LockMode) -> io::Result<bool> {
    let res = match mode {
        LockMode::Shared => FileExt::try_lock_shared(file),
        LockMode::Exclusive => FileExt::try_lock_exclusive(file),
        LockMode::Unlock => FileExt::unlock(file),
    };
    match res {
        Ok(()) => {
            trace!(?mode, "try-lock success");
            Ok(true)
        }
        Err(e) if is_contended(&e) => {
            trace!(?mode, "try-lock would block");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

fn is_contended(e: &io::Error) -> bool {
    if e.kind() == io::ErrorKind::WouldBlock {
        return true;
    }
    let contended = fs2::lock_contended_error();
    e.raw_os_error().is_some() && e.raw_os_error() == contended.raw_os_error()
}
