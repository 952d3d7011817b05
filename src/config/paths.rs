//! Where the config file lives, and the symlink guard used before writing
//! config or log files.

use dirs::config_dir;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::CONFIG_ENV;

/// Config path in effect: `$FSX_CONFIG` if set, else the per-user default.
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os(CONFIG_ENV) {
        return Some(crate::path::resolve(PathBuf::from(p)));
    }
    config_dir()
        .or_else(|| env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
        .map(|base| base.join("fsx").join("config.xml"))
}

/// True when some existing ancestor of `path` (the path itself excluded) is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    for anc in path.ancestors().skip(1).filter(|a| a.exists()) {
        if fs::symlink_metadata(anc)?.file_type().is_symlink() {
            return Ok(true);
        }
    }
    Ok(false)
}
