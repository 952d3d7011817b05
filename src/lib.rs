//! Core library for `fs_facade`.
//!
//! Object-style wrappers over the OS filesystem calls:
//! - [`FileHandle`]: one regular file; open/read/write/seek/lock/close plus metadata;
//! - [`DirectoryNode`]: one directory; enumeration, size, and recursive copy/move/empty/delete.
//!
//! Every operation is a direct mapping onto an OS call. Failures come back as
//! [`FsError`]; nothing is retried or rolled back.
//!
//! ```no_run
//! use fs_facade::{Dialect, DirectoryNode, FileHandle};
//!
//! # fn main() -> fs_facade::Result<()> {
//! let mut f = FileHandle::with_create("data/x.csv")?;
//! f.open("w+")?.write("1,2,3\n4,5,6")?.rewind()?;
//! assert_eq!(f.read_delimited(Dialect::default())?, ["1", "2", "3"]);
//! f.close()?;
//!
//! let copy = DirectoryNode::new("data").copy("backup", true)?;
//! assert!(copy.exists());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod directory;
pub mod errors;
pub mod file;
pub mod fs_ops;
pub mod output;
pub mod path;
pub mod platform;

pub use config::{Config, LogLevel, default_config_path, path_has_symlink_ancestor};
pub use directory::{DEFAULT_DIR_MODE, DirectoryNode, Entry, SizeMode};
pub use errors::{FsError, Result};
pub use file::FileHandle;
pub use fs_ops::{Dialect, LockMode, OpenMode, detect_mime_type};
