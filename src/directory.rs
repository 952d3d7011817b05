//! Recursive directory wrapper.
//!
//! A `DirectoryNode` is only a resolved path: contents, size and emptiness are
//! re-read from disk on every call and children come back as fresh values.
//!
//! Tree operations walk with `walkdir`:
//! - `copy` and `size` walk parents-first (pre-order), so mirrored directories
//!   exist before files are copied into them;
//! - `empty` and `delete` walk children-first (post-order), so directories are
//!   already empty when they are removed.
//!
//! None of them are transactional. The first failure stops the walk and is
//! returned; whatever was already copied or removed stays that way. Symlinks are
//! not followed during walks: a link is removed as a link, copied as the file it
//! points to, or mirrored as an empty directory when it points at one.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, trace};
use walkdir::WalkDir;

use crate::errors::{FsError, Result};
use crate::file::FileHandle;
use crate::fs_ops::{metadata, os_error};
use crate::path;
use crate::platform;

/// Mode used when a directory is created without an explicit one.
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// What `size_with` adds up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeMode {
    /// Every walk entry, directories included (their own OS-reported size).
    #[default]
    Entries,
    /// Only non-directory entries.
    FilesOnly,
}

impl FromStr for SizeMode {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "entries" | "all" => Ok(SizeMode::Entries),
            "files" | "files-only" | "files_only" => Ok(SizeMode::FilesOnly),
            _ => Err(format!("invalid size mode: '{s}'")),
        }
    }
}

/// One immediate child of a directory.
#[derive(Debug)]
pub enum Entry {
    File(FileHandle),
    Directory(DirectoryNode),
}

impl Entry {
    pub fn path(&self) -> &Path {
        match self {
            Entry::File(f) => f.path(),
            Entry::Directory(d) => d.path(),
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Entry::Directory(_))
    }

    pub fn into_file(self) -> Option<FileHandle> {
        match self {
            Entry::File(f) => Some(f),
            Entry::Directory(_) => None,
        }
    }

    pub fn into_directory(self) -> Option<DirectoryNode> {
        match self {
            Entry::Directory(d) => Some(d),
            Entry::File(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkOrder {
    ParentsFirst,
    ChildrenFirst,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNode {
    path: PathBuf,
}

impl DirectoryNode {
    /// Wrap `path` without touching the filesystem.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path::resolve(path),
        }
    }

    /// Wrap `path`, creating it and any missing ancestors with `mode` if absent.
    pub fn with_create(path: impl AsRef<Path>, mode: u32) -> Result<Self> {
        let dir = Self::new(path);
        if !dir.exists() {
            dir.create(mode)?;
        }
        Ok(dir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last path segment.
    pub fn name(&self) -> String {
        path::base_name(&self.path)
    }

    pub fn exists(&self) -> bool {
        self.path.is_dir()
    }

    fn check_exists(&self) -> Result<()> {
        if self.exists() {
            Ok(())
        } else {
            Err(FsError::FolderNotExists(self.path.clone()))
        }
    }

    /// Create the directory and missing ancestors. Fails if it already exists.
    pub fn create(&self, mode: u32) -> Result<&Self> {
        if self.exists() {
            return Err(FsError::FolderExists(self.path.clone()));
        }
        platform::create_dir_all(&self.path, mode)
            .map_err(os_error("create directory", &self.path))?;
        debug!(path = %self.path.display(), mode = format!("{:o}", mode), "created directory");
        Ok(self)
    }

    /// Immediate children in OS enumeration order.
    pub fn contents(&self) -> Result<Vec<Entry>> {
        self.check_exists()?;
        let reader = fs::read_dir(&self.path).map_err(os_error("read directory", &self.path))?;
        let mut out = Vec::new();
        for item in reader {
            let item = item.map_err(os_error("read directory", &self.path))?;
            let child = item.path();
            if child.is_dir() {
                out.push(Entry::Directory(DirectoryNode::new(child)));
            } else {
                out.push(Entry::File(FileHandle::new(child)));
            }
        }
        Ok(out)
    }

    /// True when the directory has no children. Only the first entry is read.
    pub fn is_empty(&self) -> Result<bool> {
        self.check_exists()?;
        let mut reader =
            fs::read_dir(&self.path).map_err(os_error("read directory", &self.path))?;
        match reader.next() {
            None => Ok(true),
            Some(Ok(_)) => Ok(false),
            Some(Err(e)) => Err(FsError::os("read directory", &self.path, e)),
        }
    }

    /// Subtree size counting directory entries too (`SizeMode::Entries`).
    pub fn size(&self) -> Result<u64> {
        self.size_with(SizeMode::Entries)
    }

    pub fn size_with(&self, mode: SizeMode) -> Result<u64> {
        let mut total = 0u64;
        for entry in self.walk(WalkOrder::ParentsFirst)? {
            let entry = entry.map_err(|e| walk_error(&self.path, e))?;
            if mode == SizeMode::FilesOnly && is_dir_entry(&entry) {
                continue;
            }
            // sizes are taken through links
            let meta = fs::metadata(entry.path()).map_err(os_error("stat entry", entry.path()))?;
            total += meta.len();
        }
        trace!(path = %self.path.display(), ?mode, total, "measured directory");
        Ok(total)
    }

    /// Remove everything below this directory, keeping the directory itself.
    pub fn empty(&self) -> Result<&Self> {
        let mut removed = 0usize;
        for entry in self.walk(WalkOrder::ChildrenFirst)? {
            let entry = entry.map_err(|e| walk_error(&self.path, e))?;
            let p = entry.path();
            if entry.file_type().is_dir() {
                fs::remove_dir(p).map_err(os_error("remove directory", p))?;
            } else {
                fs::remove_file(p).map_err(os_error("remove file", p))?;
            }
            trace!(path = %p.display(), "removed");
            removed += 1;
        }
        info!(path = %self.path.display(), removed, "Emptied directory");
        Ok(self)
    }

    /// `empty()` then remove the directory itself.
    pub fn delete(&self) -> Result<()> {
        self.empty()?;
        fs::remove_dir(&self.path).map_err(os_error("remove directory", &self.path))?;
        info!(path = %self.path.display(), "Deleted directory");
        Ok(())
    }

    /// Mirror this tree under `destination`; returns the destination node.
    ///
    /// Each file copy gets the source's mode bits and (atime, mtime). With
    /// `overwrite == false` the first already-present destination file stops the
    /// copy with `FileExists`.
    pub fn copy(&self, destination: impl AsRef<Path>, overwrite: bool) -> Result<DirectoryNode> {
        self.check_exists()?;
        let target = path::resolve(destination);
        if target.starts_with(&self.path) {
            return Err(FsError::InvalidDestination {
                source_path: self.path.clone(),
                destination: target,
            });
        }

        if !target.is_dir() {
            let root_meta =
                fs::metadata(&self.path).map_err(os_error("stat directory", &self.path))?;
            platform::create_dir_all(&target, platform::mode_bits(&root_meta))
                .map_err(os_error("create directory", &target))?;
        }

        let mut files = 0usize;
        for entry in self.walk(WalkOrder::ParentsFirst)? {
            let entry = entry.map_err(|e| walk_error(&self.path, e))?;
            let Ok(rel) = entry.path().strip_prefix(&self.path) else {
                continue;
            };
            let new_path = target.join(rel);
            let src = entry.path();

            if is_dir_entry(&entry) {
                if !new_path.is_dir() {
                    let meta = fs::metadata(src).map_err(os_error("stat directory", src))?;
                    platform::create_dir_all(&new_path, platform::mode_bits(&meta))
                        .map_err(os_error("create directory", &new_path))?;
                }
                continue;
            }

            if !overwrite && new_path.exists() {
                return Err(FsError::FileExists(new_path));
            }
            let src_meta = fs::metadata(src).map_err(os_error("stat file", src))?;
            fs::copy(src, &new_path).map_err(os_error("copy file", &new_path))?;
            metadata::replicate(&new_path, &src_meta)?;
            trace!(src = %src.display(), dest = %new_path.display(), "copied");
            files += 1;
        }

        info!(src = %self.path.display(), dest = %target.display(), files, "Copied directory tree");
        Ok(DirectoryNode { path: target })
    }

    /// `copy` then `delete`. Consumes the node; the returned node is the destination.
    pub fn move_to(self, destination: impl AsRef<Path>, overwrite: bool) -> Result<DirectoryNode> {
        let moved = self.copy(destination, overwrite)?;
        self.delete()?;
        info!(src = %self.path.display(), dest = %moved.path.display(), "Moved directory tree");
        Ok(moved)
    }

    fn walk(&self, order: WalkOrder) -> Result<walkdir::IntoIter> {
        self.check_exists()?;
        Ok(WalkDir::new(&self.path)
            .min_depth(1)
            .follow_links(false)
            .contents_first(order == WalkOrder::ChildrenFirst)
            .into_iter())
    }
}

/// Directories, and links to directories (which the walk does not descend).
fn is_dir_entry(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir())
}

fn walk_error(root: &Path, err: walkdir::Error) -> FsError {
    let at = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf());
    let io = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
    FsError::os("walk directory", &at, io)
}
