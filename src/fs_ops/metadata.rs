//! Metadata replication for copies.
//! Copies permission bits and then (atime, mtime) from already-fetched source
//! metadata onto a destination path. Failures are returned, not swallowed.

use filetime::{FileTime, set_file_times};
use std::fs;
use std::path::Path;
use tracing::trace;

use crate::errors::Result;
use crate::platform;

use super::helpers::os_error;

/// Mode bits first, then timestamps; a chmod never bumps atime/mtime so the order is stable.
pub(crate) fn replicate(dest: &Path, src_meta: &fs::Metadata) -> Result<()> {
    let mode = platform::mode_bits(src_meta);
    platform::set_mode(dest, mode).map_err(os_error("set permissions", dest))?;
    trace!(path = %dest.display(), mode = format!("{:o}", mode), "set permissions on destination");

    let atime = FileTime::from_last_access_time(src_meta);
    let mtime = FileTime::from_last_modification_time(src_meta);
    set_file_times(dest, atime, mtime).map_err(os_error("set timestamps", dest))?;
    trace!(path = %dest.display(), "set atime/mtime on destination");
    Ok(())
}
