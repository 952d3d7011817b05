//! Low-level filesystem operations used by `FileHandle` and `DirectoryNode`.

pub mod delimited;
pub mod helpers;
pub mod lock;
pub(crate) mod metadata;
pub mod mime;
pub mod open_mode;

pub use delimited::Dialect;
pub use helpers::os_error;
pub use lock::LockMode;
pub use mime::detect_mime_type;
pub use open_mode::{Access, OpenMode};
