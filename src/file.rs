//! Single-file wrapper.
//!
//! A `FileHandle` is a resolved path plus an optional open OS handle. Handle
//! operations (read/write/seek/lock/...) need a prior `open()`; metadata and path
//! operations go straight to the filesystem and never cache. Dropping the value
//! releases any handle still held.

use filetime::{FileTime, set_file_times};
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, trace};

use crate::directory::{DEFAULT_DIR_MODE, DirectoryNode};
use crate::errors::{FsError, Result};
use crate::fs_ops::{Dialect, LockMode, OpenMode, delimited, lock, metadata, mime, os_error};
use crate::path;
use crate::platform;

#[derive(Debug)]
struct OpenHandle {
    file: File,
    mode: OpenMode,
    /// Set when a read came back short; cleared by anything that moves the position.
    eof: bool,
}

#[derive(Debug)]
pub struct FileHandle {
    path: PathBuf,
    handle: Option<OpenHandle>,
    folder: DirectoryNode,
}

impl FileHandle {
    /// Wrap `path` without touching the filesystem.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path::resolve(path);
        let folder = DirectoryNode::new(path::dir_name(&path));
        Self {
            path,
            handle: None,
            folder,
        }
    }

    /// Wrap `path`, creating the parent directory chain and an empty file if absent.
    pub fn with_create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path::resolve(path);
        let folder = DirectoryNode::with_create(path::dir_name(&path), DEFAULT_DIR_MODE)?;
        let file = Self {
            path,
            handle: None,
            folder,
        };
        if !file.exists() {
            file.create()?;
        }
        Ok(file)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn base_name(&self) -> String {
        path::base_name(&self.path)
    }

    pub fn dir_name(&self) -> PathBuf {
        path::dir_name(&self.path)
    }

    /// Name without extension.
    pub fn file_name(&self) -> String {
        path::file_name(&self.path)
    }

    pub fn extension(&self) -> String {
        path::extension(&self.path)
    }

    /// The parent directory.
    pub fn folder(&self) -> &DirectoryNode {
        &self.folder
    }

    /// True if the path exists and is a regular file (symlinks followed).
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn is_readable(&self) -> bool {
        platform::can_read(&self.path)
    }

    pub fn is_writable(&self) -> bool {
        platform::can_write(&self.path)
    }

    pub fn is_executable(&self) -> bool {
        platform::can_execute(&self.path)
    }

    /// True while a handle is held.
    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// Mode of the held handle.
    pub fn open_mode(&self) -> Option<OpenMode> {
        self.handle.as_ref().map(|h| h.mode)
    }

    // ---- handle lifecycle -------------------------------------------------

    /// Open with an fopen-style mode string ("r", "w+", "a", "x", "c+", ...).
    pub fn open(&mut self, mode: &str) -> Result<&mut Self> {
        let mode: OpenMode = mode.parse()?;
        self.open_with(mode)
    }

    /// Open with a parsed mode. Any handle already held is released first.
    pub fn open_with(&mut self, mode: OpenMode) -> Result<&mut Self> {
        self.handle = None;
        let file = mode
            .to_options()
            .open(&self.path)
            .map_err(os_error("open file", &self.path))?;
        trace!(path = %self.path.display(), %mode, "opened handle");
        self.handle = Some(OpenHandle {
            file,
            mode,
            eof: false,
        });
        Ok(self)
    }

    /// Release the handle, reporting the result of the close call.
    pub fn close(&mut self) -> Result<&mut Self> {
        let handle = self.handle.take().ok_or(FsError::InvalidHandle)?;
        platform::close_file(handle.file).map_err(os_error("close file", &self.path))?;
        trace!(path = %self.path.display(), "closed handle");
        Ok(self)
    }

    /// Path and held handle, borrowed side by side.
    fn parts(&mut self) -> Result<(&Path, &mut OpenHandle)> {
        let handle = self.handle.as_mut().ok_or(FsError::InvalidHandle)?;
        Ok((&self.path, handle))
    }

    // ---- handle operations ------------------------------------------------

    /// Read up to `len` bytes from the current position. A short read marks end of file.
    pub fn read(&mut self, len: usize) -> Result<Vec<u8>> {
        let (path, h) = self.parts()?;
        let mut buf = Vec::with_capacity(len.min(64 * 1024));
        (&h.file)
            .take(len as u64)
            .read_to_end(&mut buf)
            .map_err(os_error("read file", path))?;
        if buf.len() < len {
            h.eof = true;
        }
        Ok(buf)
    }

    pub fn write(&mut self, data: impl AsRef<[u8]>) -> Result<&mut Self> {
        let (path, h) = self.parts()?;
        h.file
            .write_all(data.as_ref())
            .map_err(os_error("write file", path))?;
        h.eof = false;
        Ok(self)
    }

    /// Move to an absolute byte offset.
    pub fn seek(&mut self, offset: u64) -> Result<&mut Self> {
        let (path, h) = self.parts()?;
        h.file
            .seek(SeekFrom::Start(offset))
            .map_err(os_error("seek file", path))?;
        h.eof = false;
        Ok(self)
    }

    pub fn rewind(&mut self) -> Result<&mut Self> {
        self.seek(0)
    }

    /// Current byte offset.
    pub fn tell(&mut self) -> Result<u64> {
        let (path, h) = self.parts()?;
        h.file.stream_position().map_err(os_error("tell file", path))
    }

    /// Cut (or extend) the file to `size` bytes. The position is left unchanged.
    pub fn truncate(&mut self, size: u64) -> Result<&mut Self> {
        let (path, h) = self.parts()?;
        h.file.set_len(size).map_err(os_error("truncate file", path))?;
        h.eof = false;
        Ok(self)
    }

    /// True once a read has hit the end of the file.
    pub fn at_end(&self) -> Result<bool> {
        self.handle
            .as_ref()
            .map(|h| h.eof)
            .ok_or(FsError::InvalidHandle)
    }

    /// Advisory lock; blocks until granted.
    pub fn lock(&mut self, mode: LockMode) -> Result<&mut Self> {
        let (path, h) = self.parts()?;
        lock::apply(&h.file, mode).map_err(os_error("lock file", path))?;
        Ok(self)
    }

    pub fn unlock(&mut self) -> Result<&mut Self> {
        self.lock(LockMode::Unlock)
    }

    /// Non-blocking lock. Ok(false) when another holder has it.
    pub fn try_lock(&mut self, mode: LockMode) -> Result<bool> {
        let (path, h) = self.parts()?;
        lock::try_apply(&h.file, mode).map_err(os_error("lock file", path))
    }

    /// Read the next delimited record from the current position.
    pub fn read_delimited(&mut self, dialect: Dialect) -> Result<Vec<String>> {
        let (path, h) = self.parts()?;
        match delimited::read_record(&mut h.file, &dialect) {
            Ok(Some(record)) => {
                h.eof = record.hit_end;
                Ok(record.fields)
            }
            Ok(None) => {
                h.eof = true;
                Err(FsError::EndOfFile(path.to_path_buf()))
            }
            Err(e) => Err(FsError::os("read record", path, e)),
        }
    }

    // ---- metadata ---------------------------------------------------------

    fn check_exists(&self) -> Result<()> {
        if self.exists() {
            Ok(())
        } else {
            Err(FsError::FileNotExists(self.path.clone()))
        }
    }

    fn stat(&self) -> Result<fs::Metadata> {
        self.check_exists()?;
        fs::metadata(&self.path).map_err(os_error("stat file", &self.path))
    }

    pub fn access_time(&self) -> Result<SystemTime> {
        self.stat()?
            .accessed()
            .map_err(os_error("read access time", &self.path))
    }

    pub fn modified_time(&self) -> Result<SystemTime> {
        self.stat()?
            .modified()
            .map_err(os_error("read modified time", &self.path))
    }

    /// Size in bytes.
    pub fn size(&self) -> Result<u64> {
        Ok(self.stat()?.len())
    }

    /// Numeric owner id.
    #[cfg(unix)]
    pub fn owner(&self) -> Result<u32> {
        Ok(platform::owner(&self.stat()?))
    }

    /// Numeric group id.
    #[cfg(unix)]
    pub fn group(&self) -> Result<u32> {
        Ok(platform::group(&self.stat()?))
    }

    /// Permission bits as an octal string, e.g. "644".
    pub fn permissions(&self) -> Result<String> {
        Ok(format!("{:o}", platform::mode_bits(&self.stat()?)))
    }

    /// Primary MIME type from the file's content.
    pub fn mime_type(&self) -> Result<String> {
        self.check_exists()?;
        mime::detect_mime_type(&self.path).map_err(os_error("detect mime type", &self.path))
    }

    /// Whole file content, read by path.
    pub fn contents(&self) -> Result<Vec<u8>> {
        self.check_exists()?;
        fs::read(&self.path).map_err(os_error("read file", &self.path))
    }

    // ---- path operations --------------------------------------------------

    pub fn chmod(&self, mode: u32) -> Result<&Self> {
        self.check_exists()?;
        platform::set_mode(&self.path, mode).map_err(os_error("chmod", &self.path))?;
        debug!(path = %self.path.display(), mode = format!("{:o}", mode), "changed permissions");
        Ok(self)
    }

    /// Create an empty file (and the parent chain). Fails if the file exists.
    pub fn create(&self) -> Result<&Self> {
        if self.exists() {
            return Err(FsError::FileExists(self.path.clone()));
        }
        if !self.folder.exists() {
            self.folder.create(DEFAULT_DIR_MODE)?;
        }
        self.touch(None, None)?;
        debug!(path = %self.path.display(), "created file");
        Ok(self)
    }

    /// Copy to `destination`, then give the copy this file's mode bits and (atime, mtime).
    pub fn copy(&self, destination: impl AsRef<Path>, overwrite: bool) -> Result<FileHandle> {
        let src_meta = self.stat()?;
        let target = path::resolve(destination);
        if target == self.path {
            return Err(FsError::InvalidDestination {
                source_path: self.path.clone(),
                destination: target,
            });
        }
        if !overwrite && target.exists() {
            return Err(FsError::FileExists(target));
        }

        fs::copy(&self.path, &target).map_err(os_error("copy file", &target))?;
        metadata::replicate(&target, &src_meta)?;
        debug!(src = %self.path.display(), dest = %target.display(), "copied file");
        Ok(FileHandle::new(target))
    }

    pub fn delete(&self) -> Result<()> {
        self.check_exists()?;
        fs::remove_file(&self.path).map_err(os_error("remove file", &self.path))?;
        debug!(path = %self.path.display(), "deleted file");
        Ok(())
    }

    /// Set modified time (default now) and access time (default: same as modified),
    /// creating the file if it does not exist.
    pub fn touch(&self, time: Option<SystemTime>, access_time: Option<SystemTime>) -> Result<&Self> {
        let mtime = time.unwrap_or_else(SystemTime::now);
        let atime = access_time.unwrap_or(mtime);
        if !self.path.exists() {
            OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(false)
                .open(&self.path)
                .map_err(os_error("create file", &self.path))?;
        }
        set_file_times(
            &self.path,
            FileTime::from_system_time(atime),
            FileTime::from_system_time(mtime),
        )
        .map_err(os_error("set timestamps", &self.path))?;
        Ok(self)
    }
}

impl Drop for FileHandle {
    fn drop(&mut self) {
        if self.handle.is_some() {
            trace!(path = %self.path.display(), "releasing handle left open");
        }
    }
}
