use assert_fs::TempDir;
use filetime::FileTime;
use fs_facade::{DEFAULT_DIR_MODE, DirectoryNode, FileHandle, FsError};
use std::fs;
use std::path::Path;

fn build_tree(root: &Path) {
    fs::create_dir_all(root.join("nested").join("deeper")).unwrap();
    fs::write(root.join("b.txt"), "hi").unwrap();
    fs::write(root.join("nested").join("n.bin"), [1u8, 2, 3]).unwrap();
    fs::write(root.join("nested").join("deeper").join("d.txt"), "deep").unwrap();
}

#[test]
fn copy_then_delete_source_leaves_copy_untouched() {
    let td = TempDir::new().unwrap();
    let root = dunce::canonicalize(td.path()).unwrap();
    let a = DirectoryNode::with_create(root.join("a"), DEFAULT_DIR_MODE).unwrap();
    FileHandle::with_create(a.path().join("b.txt"))
        .unwrap()
        .open("w")
        .unwrap()
        .write("hi")
        .unwrap()
        .close()
        .unwrap();

    let c = a.copy(root.join("c"), true).unwrap();
    assert_eq!(c.path(), root.join("c"));
    assert_eq!(fs::read_to_string(root.join("c").join("b.txt")).unwrap(), "hi");

    a.delete().unwrap();
    assert!(!a.exists());
    assert_eq!(fs::read_to_string(c.path().join("b.txt")).unwrap(), "hi");
}

#[test]
fn copy_reproduces_bytes_and_times() {
    let td = TempDir::new().unwrap();
    let src_root = td.path().join("src");
    build_tree(&src_root);

    let mtime = FileTime::from_unix_time(1_400_000_000, 0);
    let atime = FileTime::from_unix_time(1_300_000_000, 0);
    let deep = src_root.join("nested").join("deeper").join("d.txt");
    filetime::set_file_times(&deep, atime, mtime).unwrap();

    let dest = DirectoryNode::new(&src_root)
        .copy(td.path().join("dest"), true)
        .unwrap();

    // times first: reading the copy may bump its atime
    let copied = fs::metadata(dest.path().join("nested/deeper/d.txt")).unwrap();
    assert_eq!(FileTime::from_last_modification_time(&copied), mtime);
    assert_eq!(FileTime::from_last_access_time(&copied), atime);

    for rel in ["b.txt", "nested/n.bin", "nested/deeper/d.txt"] {
        assert_eq!(
            fs::read(src_root.join(rel)).unwrap(),
            fs::read(dest.path().join(rel)).unwrap(),
            "{rel}"
        );
    }
}

#[cfg(unix)]
#[test]
fn copy_reproduces_mode_bits() {
    use std::os::unix::fs::PermissionsExt;

    let td = TempDir::new().unwrap();
    let src_root = td.path().join("src");
    build_tree(&src_root);
    fs::set_permissions(src_root.join("b.txt"), fs::Permissions::from_mode(0o640)).unwrap();
    fs::set_permissions(
        src_root.join("nested").join("n.bin"),
        fs::Permissions::from_mode(0o751),
    )
    .unwrap();

    let dest = DirectoryNode::new(&src_root)
        .copy(td.path().join("dest"), true)
        .unwrap();

    let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode(&dest.path().join("b.txt")), 0o640);
    assert_eq!(mode(&dest.path().join("nested").join("n.bin")), 0o751);
}

#[test]
fn copy_without_overwrite_stops_on_existing_file() {
    let td = TempDir::new().unwrap();
    let src_root = td.path().join("src");
    build_tree(&src_root);
    let dest_root = td.path().join("dest");
    fs::create_dir_all(&dest_root).unwrap();
    fs::write(dest_root.join("b.txt"), "old").unwrap();

    let err = DirectoryNode::new(&src_root)
        .copy(&dest_root, false)
        .unwrap_err();
    assert!(matches!(err, FsError::FileExists(ref p) if p.ends_with("b.txt")), "{err}");
    assert_eq!(fs::read_to_string(dest_root.join("b.txt")).unwrap(), "old");
}

#[test]
fn copy_with_overwrite_replaces_existing_file() {
    let td = TempDir::new().unwrap();
    let src_root = td.path().join("src");
    build_tree(&src_root);
    let dest_root = td.path().join("dest");
    fs::create_dir_all(&dest_root).unwrap();
    fs::write(dest_root.join("b.txt"), "old").unwrap();
    fs::write(dest_root.join("extra.txt"), "extra").unwrap();

    DirectoryNode::new(&src_root).copy(&dest_root, true).unwrap();
    assert_eq!(fs::read_to_string(dest_root.join("b.txt")).unwrap(), "hi");
    assert!(dest_root.join("extra.txt").exists(), "copy does not prune the destination");
}

#[test]
fn move_returns_destination_and_removes_source() {
    let td = TempDir::new().unwrap();
    let root = dunce::canonicalize(td.path()).unwrap();
    let src_root = root.join("src");
    build_tree(&src_root);

    let src = DirectoryNode::new(&src_root);
    let moved = src.move_to(root.join("moved"), true).unwrap();

    assert_eq!(moved.path(), root.join("moved"));
    assert!(moved.exists());
    assert!(!src_root.exists());
    assert_eq!(
        fs::read_to_string(moved.path().join("nested/deeper/d.txt")).unwrap(),
        "deep"
    );
}

#[test]
fn failed_move_keeps_source() {
    let td = TempDir::new().unwrap();
    let src_root = td.path().join("src");
    build_tree(&src_root);
    let dest_root = td.path().join("dest");
    fs::create_dir_all(&dest_root).unwrap();
    fs::write(dest_root.join("b.txt"), "old").unwrap();

    let err = DirectoryNode::new(&src_root)
        .move_to(&dest_root, false)
        .unwrap_err();
    assert!(matches!(err, FsError::FileExists(_)));
    assert!(src_root.join("b.txt").exists());
}

#[cfg(unix)]
#[test]
fn linked_directory_is_mirrored_without_descending() {
    let td = TempDir::new().unwrap();
    let real = td.path().join("real");
    fs::create_dir_all(&real).unwrap();
    fs::write(real.join("inside.txt"), "kept").unwrap();
    let src_root = td.path().join("src");
    fs::create_dir_all(&src_root).unwrap();
    fs::write(src_root.join("a.txt"), "a").unwrap();
    std::os::unix::fs::symlink("../real", src_root.join("link")).unwrap();

    let dest = DirectoryNode::new(&src_root)
        .copy(td.path().join("dst"), true)
        .unwrap();
    let mirrored = dest.path().join("link");
    assert!(!fs::symlink_metadata(&mirrored).unwrap().file_type().is_symlink());
    assert!(mirrored.is_dir());
    assert_eq!(fs::read_dir(&mirrored).unwrap().count(), 0);
    assert_eq!(fs::read_to_string(dest.path().join("a.txt")).unwrap(), "a");

    let moved = DirectoryNode::new(&src_root)
        .move_to(td.path().join("moved"), true)
        .unwrap();
    assert!(moved.path().join("link").is_dir());
    assert!(!src_root.exists());
    assert_eq!(fs::read_to_string(real.join("inside.txt")).unwrap(), "kept");
}
