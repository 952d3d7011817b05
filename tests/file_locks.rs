use fs_facade::{FileHandle, FsError, LockMode};
use tempfile::tempdir;

#[test]
fn lock_needs_an_open_handle() {
    let td = tempdir().unwrap();
    let mut f = FileHandle::with_create(td.path().join("l.txt")).unwrap();
    assert!(matches!(f.lock(LockMode::Shared), Err(FsError::InvalidHandle)));
    assert!(matches!(f.try_lock(LockMode::Exclusive), Err(FsError::InvalidHandle)));
}

#[test]
fn shared_locks_coexist() {
    let td = tempdir().unwrap();
    let p = td.path().join("l.txt");
    let mut a = FileHandle::with_create(&p).unwrap();
    let mut b = FileHandle::new(&p);
    a.open("r").unwrap().lock(LockMode::Shared).unwrap();
    b.open("r").unwrap();
    assert!(b.try_lock(LockMode::Shared).unwrap());
}

#[test]
fn exclusive_is_contended_until_unlock() {
    let td = tempdir().unwrap();
    let p = td.path().join("l.txt");
    let mut holder = FileHandle::with_create(&p).unwrap();
    let mut other = FileHandle::new(&p);

    holder.open("r+").unwrap().lock(LockMode::Exclusive).unwrap();
    other.open("r").unwrap();
    assert!(!other.try_lock(LockMode::Shared).unwrap());
    assert!(!other.try_lock(LockMode::Exclusive).unwrap());

    holder.unlock().unwrap();
    assert!(other.try_lock(LockMode::Exclusive).unwrap());
}

#[test]
fn close_releases_the_lock() {
    let td = tempdir().unwrap();
    let p = td.path().join("l.txt");
    let mut holder = FileHandle::with_create(&p).unwrap();
    let mut other = FileHandle::new(&p);

    holder.open("r").unwrap().lock(LockMode::Shared).unwrap();
    other.open("r").unwrap();
    assert!(!other.try_lock(LockMode::Exclusive).unwrap());

    holder.close().unwrap();
    assert!(other.try_lock(LockMode::Exclusive).unwrap());
}
