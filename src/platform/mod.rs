//! Platform-specific helpers.
//! This module hides OS differences (Unix/other) behind a uniform API so
//! the rest of the codebase can remain platform-agnostic.

#[cfg(unix)]
mod unix;
#[cfg(not(unix))]
mod windows;

#[cfg(unix)]
pub use unix::{
    can_execute, can_read, can_write, close_file, create_dir_all, create_private_new, group,
    mode_bits, open_log_file_secure_append, owner, set_mode,
};

#[cfg(not(unix))]
pub use windows::{
    can_execute, can_read, can_write, close_file, create_dir_all, create_private_new, mode_bits,
    open_log_file_secure_append, set_mode,
};
