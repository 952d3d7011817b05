use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

use fs_facade::path::resolve;
use fs_facade::{DEFAULT_DIR_MODE, DirectoryNode, FileHandle};

/// Runs `f` with the process working directory set to `dir`, restoring it afterwards.
fn in_dir<T>(dir: &Path, f: impl FnOnce() -> T) -> T {
    let prev = env::current_dir().unwrap();
    env::set_current_dir(dir).unwrap();
    let out = f();
    env::set_current_dir(prev).unwrap();
    out
}

#[test]
#[serial]
fn relative_paths_resolve_against_cwd() {
    let td = tempdir().unwrap();
    let root = dunce::canonicalize(td.path()).unwrap();

    let (file, dir) = in_dir(&root, || {
        let f = FileHandle::with_create("sub/x.txt").unwrap();
        let d = DirectoryNode::new("./sub/../sub");
        (f.path().to_path_buf(), d.path().to_path_buf())
    });

    assert_eq!(file, root.join("sub").join("x.txt"));
    assert_eq!(dir, root.join("sub"));
    assert!(file.is_file());
}

#[test]
#[serial]
fn copy_destination_is_resolved_too() {
    let td = tempdir().unwrap();
    let root = dunce::canonicalize(td.path()).unwrap();

    let copied: PathBuf = in_dir(&root, || {
        let src = DirectoryNode::with_create("src", DEFAULT_DIR_MODE).unwrap();
        std::fs::write(src.path().join("a.txt"), "a").unwrap();
        src.copy("out/../dest", true).unwrap().path().to_path_buf()
    });

    assert_eq!(copied, root.join("dest"));
    assert!(root.join("dest").join("a.txt").is_file());
}

#[cfg(unix)]
#[test]
fn absolute_paths_are_normalized_lexically() {
    let p = resolve("/tmp/a/./b/../c");
    assert_eq!(p, PathBuf::from("/tmp/a/c"));
}
