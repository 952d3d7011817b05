//! Pure path helpers.
//!
//! `resolve` makes a path absolute against the current directory and folds `.`/`..`
//! lexically; it never touches the filesystem beyond reading the current directory,
//! so it works for paths that do not exist yet.

use std::env;
use std::path::{Component, Path, PathBuf};

/// Absolute, lexically normalized form of `path`.
///
/// If the current directory cannot be read, a relative path is normalized as-is.
pub fn resolve(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    dunce::simplified(&normalize(&joined)).to_path_buf()
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            // popping at the root is a no-op, so "/.." stays "/"
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}

/// Last path segment ("b.txt" for "/a/b.txt").
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Parent directory; the path itself when it has none (root).
pub fn dir_name(path: &Path) -> PathBuf {
    path.parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| path.to_path_buf())
}

/// File name without its extension ("b" for "/a/b.txt").
pub fn file_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Extension without the dot; empty when there is none.
pub fn extension(path: &Path) -> String {
    path.extension()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
